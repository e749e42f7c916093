// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_lower = lang.to_lowercase();

    match lang_lower.as_str() {
        "am" => {
            translations.insert("brand", "ሬድሲ ማርት");
            translations.insert("marketplace", "የኢትዮጵያ ዲጂታል ገበያ");
            translations.insert("login", "ግባ");
            translations.insert("phone", "ስልክ ቁጥር");
            translations.insert("password", "የይለፍ ቃል");
            translations.insert("search", "ፈልግ");
            translations.insert("nearby_products", "በአቅራቢያ ያሉ ምርቶች");
            translations.insert("no_products", "ምንም ምርት አልተገኘም");
            translations.insert("error", "ስህተት ተከስቷል፣ እባክዎ እንደገና ይሞክሩ");
            translations.insert("detect_location", "የአሁኑን ቦታ ተጠቀም");
            translations.insert("nearby_orders", "በአቅራቢያ ያሉ ትዕዛዞች");
            translations.insert("logout", "ውጣ");
            translations.insert("latitude", "ኬክሮስ");
            translations.insert("longitude", "ኬንትሮስ");
            translations.insert("radius_km", "ራዲየስ (ኪሜ)");
            translations.insert("searching", "በመፈለግ ላይ...");
            translations.insert("locating", "ቦታ በመፈለግ ላይ...");
            translations.insert("confirm_pickup", "መነሳት አረጋግጥ");
            translations.insert("confirm_dropoff", "ማድረስ አረጋግጥ");
            translations.insert("choose_navigation", "የመንገድ መምሪያ ይምረጡ");
            translations.insert("integrated_map", "የውስጥ ካርታ");
            translations.insert("external_maps", "Google Maps");
            translations.insert("change_nav", "መምሪያ ቀይር");
            translations.insert("delivered", "ደርሷል!");
        }
        _ => {
            // Inglés por defecto
            translations.insert("brand", "RedSea Mart");
            translations.insert("marketplace", "Ethio Digital Marketplace");
            translations.insert("login", "Login");
            translations.insert("phone", "Phone Number");
            translations.insert("password", "Password");
            translations.insert("search", "Search");
            translations.insert("nearby_products", "Nearby Products");
            translations.insert("no_products", "No products found");
            translations.insert("error", "An error occurred, please try again");
            translations.insert("detect_location", "Use Current Location");
            translations.insert("nearby_orders", "Nearby Orders");
            translations.insert("logout", "Logout");
            translations.insert("latitude", "Latitude");
            translations.insert("longitude", "Longitude");
            translations.insert("radius_km", "Radius (km)");
            translations.insert("searching", "Searching...");
            translations.insert("locating", "Locating...");
            translations.insert("confirm_pickup", "Confirm Pickup");
            translations.insert("confirm_dropoff", "Confirm Dropoff");
            translations.insert("choose_navigation", "Choose Navigation");
            translations.insert("integrated_map", "Integrated Map");
            translations.insert("external_maps", "Google Maps");
            translations.insert("change_nav", "Change Nav");
            translations.insert("delivered", "Delivered!");
        }
    }

    translations
}

/// Traducir una clave; si no existe, devuelve la clave tal cual.
pub fn t(key: &str, lang: &str) -> String {
    get_translations(lang)
        .get(key)
        .map(|s| s.to_string())
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_and_key() {
        assert_eq!(t("search", "en"), "Search");
        assert_eq!(t("search", "fr"), "Search");
        assert_eq!(t("unknown_key", "en"), "unknown_key");
    }

    #[test]
    fn amharic_table_is_wired() {
        assert_eq!(t("no_products", "am"), "ምንም ምርት አልተገኘም");
        assert_eq!(t("no_products", "AM"), "ምንም ምርት አልተገኘም");
    }
}
