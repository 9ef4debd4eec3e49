//! Static lookup tables mapping human-readable names to the numeric codes
//! the upstream form expects.
//!
//! The tables are process-wide, read-only data. Lookups are case-insensitive
//! exact matches; an unknown name resolves to `None`, which callers must
//! treat as "do not go to the network".

/// State name to the two-digit code used by the `cboState` dropdown.
const STATE_CODES: &[(&'static str, &'static str)] = &[
    ("andhra pradesh", "01"),
    ("arunachal pradesh", "02"),
    ("assam", "03"),
    ("bihar", "04"),
    ("chhattisgarh", "05"),
    ("goa", "06"),
    ("gujarat", "07"),
    ("haryana", "08"),
    ("himachal pradesh", "09"),
    ("jammu and kashmir", "10"),
    ("jharkhand", "11"),
    ("karnataka", "12"),
    ("kerala", "13"),
    ("madhya pradesh", "14"),
    ("maharashtra", "15"),
    ("manipur", "16"),
    ("meghalaya", "17"),
    ("mizoram", "18"),
    ("nagaland", "19"),
    ("odisha", "20"),
    ("punjab", "21"),
    ("rajasthan", "22"),
    ("sikkim", "23"),
    ("tamil nadu", "24"),
    ("telangana", "25"),
    ("tripura", "26"),
    ("uttar pradesh", "27"),
    ("uttarakhand", "28"),
    ("west bengal", "29"),
    ("andaman and nicobar islands", "30"),
    ("chandigarh", "31"),
    ("dadra and nagar haveli", "32"),
    ("daman and diu", "33"),
    ("delhi", "34"),
    ("lakshadweep", "35"),
    ("puducherry", "36"),
];

/// Commodity name to the code used by the `cboCommodity` dropdown.
const COMMODITY_CODES: &[(&'static str, &'static str)] = &[
    ("potato", "24"),
    ("tomato", "78"),
    ("onion", "23"),
    ("rice", "1"),
    ("wheat", "2"),
    ("maize", "3"),
    ("apple", "4"),
    ("banana", "5"),
    ("orange", "6"),
    ("mango", "7"),
    ("grapes", "8"),
    ("watermelon", "9"),
    ("coconut", "10"),
    ("sugarcane", "11"),
    ("cotton", "12"),
    ("jute", "13"),
    ("coffee", "14"),
    ("tea", "15"),
    ("milk", "16"),
    ("egg", "17"),
    ("fish", "18"),
    ("chicken", "19"),
    ("mutton", "20"),
    ("beef", "21"),
    ("pork", "22"),
];

/// Markets enumerated per state for the batch crawl. States absent here are
/// skipped by `/all-data`, matching upstream coverage.
const MARKETS_BY_STATE: &[(&'static str, &'static [&'static str])] = &[
    ("karnataka", &["Bangalore", "Mysore", "Hubli"]),
    ("maharashtra", &["Pune", "Mumbai", "Nagpur"]),
];

fn lookup(
    table: &'static [(&'static str, &'static str)],
    name: &str,
) -> Option<&'static str> {
    let name = name.trim();
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

/// Resolves a state name to its form code. `None` means unresolved.
pub fn state_code(name: &str) -> Option<&'static str> {
    lookup(STATE_CODES, name)
}

/// Resolves a commodity name to its form code. `None` means unresolved.
pub fn commodity_code(name: &str) -> Option<&'static str> {
    lookup(COMMODITY_CODES, name)
}

/// Markets known for a state, or an empty slice when none are enumerated.
pub fn markets_for(state: &str) -> &'static [&'static str] {
    let state = state.trim();
    MARKETS_BY_STATE
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(state))
        .map(|(_, markets)| *markets)
        .unwrap_or(&[])
}

/// All state names known to the resolver, in table order.
pub fn all_states() -> impl Iterator<Item = &'static str> {
    STATE_CODES.iter().map(|(name, _)| *name)
}

/// All commodity names known to the resolver, in table order.
pub fn all_commodities() -> impl Iterator<Item = &'static str> {
    COMMODITY_CODES.iter().map(|(name, _)| *name)
}
