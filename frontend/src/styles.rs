use client::Tone;

pub const CONTAINER: &str = "bg-gray-900 container mx-auto px-6 py-10 max-w-5xl rounded-xl shadow-lg mt-16";
pub const CONTAINER_SM: &str = "container mx-auto px-6 py-10 max-w-2xl rounded-xl shadow-lg mt-16";

pub const CARD: &str = "bg-gray-800 border border-gray-700 rounded-lg shadow-md p-6 max-w-xl mx-auto";
pub const CARD_HOVER_SCALE: &str = "bg-gray-800 border border-gray-700 rounded-lg shadow-md p-6 transform transition-transform duration-200 hover:scale-105";
pub const CARD_SECTION: &str = "bg-gray-800 border border-gray-700 p-4 rounded-lg shadow-sm";
pub const ALERT_CARD: &str = "p-4 rounded-lg shadow-md mb-6";

pub const ENTRY_CARD: &str = "flex flex-col gap-2 bg-gray-900 border border-gray-700 rounded-lg p-3 cursor-pointer hover:border-orange-400";
pub const ENTRY_CARD_SELECTED: &str = "border-orange-500 ring-2 ring-orange-400";
pub const ENTRY_IMAGE: &str = "w-full h-48 object-cover rounded-md";
pub const ENTRY_GRID: &str = "grid gap-4 sm:grid-cols-2 lg:grid-cols-3";

pub const INPUT_BASE: &str = "appearance-none border border-gray-600 bg-gray-800 text-white text-lg rounded-md w-full py-2 px-4 focus:outline-none focus:border-orange-500";
pub const INPUT_GROUP: &str = "flex-1 flex flex-col gap-2";

pub const BUTTON_BASE: &str = "px-5 py-2 rounded-lg font-medium text-white transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_PRIMARY: &str = "bg-orange-600 hover:bg-orange-700 focus:ring-2 focus:ring-orange-400 focus:outline-none";
pub const BUTTON_SECONDARY: &str = "bg-gray-700 hover:bg-gray-600 focus:ring-2 focus:ring-gray-400 focus:outline-none";
pub const BUTTON_FULL: &str = "w-full py-3 px-5 font-semibold rounded-lg transition-all duration-150 disabled:opacity-50 disabled:cursor-not-allowed mt-6";

pub const TEXT_LABEL: &str = "block text-sm font-semibold text-gray-200";
pub const TEXT_MUTED: &str = "text-sm text-gray-400";
pub const HEADING_LG: &str = "text-3xl font-extrabold mb-4 text-center text-gray-100";
pub const HEADING_MD: &str = "text-2xl font-bold mb-5 text-gray-100";
pub const HEADING_SM: &str = "text-xl font-semibold mb-3 text-gray-100";

pub const FLEX_BETWEEN: &str = "flex justify-between items-center";
pub const SPACE_Y_BASE: &str = "space-y-3";
pub const SPACE_Y_LG: &str = "space-y-6";
pub const BG_PAGE: &str = "bg-gray-900 min-h-screen";

pub fn combine_classes(base: &str, additional: &str) -> String {
    format!("{} {}", base, additional)
}

pub fn button_primary(full_width: bool) -> String {
    if full_width {
        combine_classes(BUTTON_BASE, &combine_classes(BUTTON_PRIMARY, BUTTON_FULL))
    } else {
        combine_classes(BUTTON_BASE, BUTTON_PRIMARY)
    }
}

pub fn button_secondary() -> String {
    combine_classes(BUTTON_BASE, BUTTON_SECONDARY)
}

pub fn alert_style(tone: Tone) -> String {
    match tone {
        Tone::Error => combine_classes(ALERT_CARD, "bg-red-500 text-white shadow-lg"),
        Tone::Success => combine_classes(ALERT_CARD, "bg-green-500 text-white shadow-lg"),
        Tone::Info => combine_classes(ALERT_CARD, "bg-orange-500 text-white shadow-lg"),
    }
}

pub fn entry_card(selected: bool) -> String {
    if selected {
        combine_classes(ENTRY_CARD, ENTRY_CARD_SELECTED)
    } else {
        ENTRY_CARD.to_string()
    }
}
