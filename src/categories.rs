//! Built-in catalog of business categories.
//!
//! Terms are Indonesian trade names as they appear in profile bios, kept in
//! byte order so listings are stable.

/// Every category offered by the `categories` command and `--all`.
pub const CATEGORIES: &[&str] = &[
    "Angkringan",
    "Apotek",
    "Baby Shop",
    "Bakery",
    "Barbershop",
    "Bengkel",
    "Boutique",
    "Cafe",
    "Catering",
    "Coffee Shop",
    "Dekorasi",
    "Dessert",
    "Distro",
    "Fashion",
    "Fitness",
    "Florist",
    "Fotographer",
    "Frozen Food",
    "Furniture",
    "Gadget",
    "Gift Shop",
    "Gym",
    "Hijab",
    "Interior",
    "Jahit",
    "Jasa Kurir",
    "Kedai Kopi",
    "Klinik Kecantikan",
    "Laundry",
    "MUA",
    "Make Up Artist",
    "Mebel",
    "Nail Art",
    "Oleh-oleh",
    "Optik",
    "Percetakan",
    "Petshop",
    "Photography",
    "Rental Mobil",
    "Resto",
    "Rumah Makan",
    "Salon",
    "Service HP",
    "Skincare",
    "Spa",
    "Thrift",
    "Toko Baju",
    "Toko Bangunan",
    "Toko Elektronik",
    "Toko Kain",
    "Toko Kue",
    "Toko Mainan",
    "Toko Mas",
    "Toko Perhiasan",
    "Toko Sepatu",
    "Toko Tanaman",
    "Toko Tas",
    "Travel",
    "Undangan",
    "Variasi Motor",
    "Videography",
    "Warung",
    "Wedding Organizer",
];

/// Look up a catalog entry case-insensitively, returning its canonical spelling.
pub fn resolve(term: &str) -> Option<&'static str> {
    let term = term.trim();
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(term))
}

/// Returns `true` if `term` names a catalog entry (ignoring case).
pub fn is_known(term: &str) -> bool {
    resolve(term).is_some()
}
