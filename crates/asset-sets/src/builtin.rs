//! Built-in state and province table
//!
//! US states and territories merged with Canadian provinces and territories.
//! Both the full name and the postal abbreviation of every entry are members
//! of the resulting set.

use crate::set::{AssetKind, AssetSet};

/// US states, DC and territories with their postal abbreviations
pub const US_STATES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Northern Mariana Islands", "MP"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Palau", "PW"),
    ("Pennsylvania", "PA"),
    ("Puerto Rico", "PR"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virgin Islands", "VI"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("Washington, DC", "DC"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Canadian provinces and territories with their postal abbreviations
pub const CANADIAN_PROVINCES: &[(&str, &str)] = &[
    ("British Columbia", "BC"),
    ("Newfoundland and Labrador", "NL"),
    ("Saskatchewan", "SK"),
    ("Prince Edward Island", "PE"),
    ("Ontario", "ON"),
    ("Nova Scotia", "NS"),
    ("Quebec", "QC"),
    ("Alberta", "AB"),
    ("Manitoba", "MB"),
    ("Northwest Territories", "NT"),
    ("New Brunswick", "NB"),
    ("Nunavut", "NU"),
    ("Yukon", "YT"),
];

/// Every name and abbreviation from both tables, in table order
pub fn state_and_province_tokens() -> impl Iterator<Item = &'static str> {
    US_STATES
        .iter()
        .chain(CANADIAN_PROVINCES)
        .flat_map(|(name, abbrev)| [*name, *abbrev])
}

/// The `States` asset set built from the embedded tables
pub fn states_and_provinces() -> AssetSet {
    AssetSet::from_tokens(AssetKind::States.file_name(), state_and_province_tokens())
}
