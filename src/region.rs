//! Named country groups used as a selection shortcut.
//!
//! Geographic groups follow the UN M49 sub-regions; the remaining entries are
//! economic blocs.

use ahash::AHashSet;

pub const REGIONS: &[(&str, &[&str])] = &[
    (
        "Eastern Africa",
        &[
            "BDI", "COM", "DJI", "ERI", "ETH", "KEN", "MDG", "MWI", "MUS", "MOZ", "RWA", "SYC",
            "SSD", "UGA", "TZA", "ZMB", "ZWE",
        ],
    ),
    (
        "Middle Africa",
        &["AGO", "CMR", "CAF", "TCD", "COD", "COD", "GNQ", "GAB", "STP"],
    ),
    ("Northern Africa", &["DZA", "EGY", "LBY", "MAR", "SDN", "TUN"]),
    ("Southern Africa", &["BWA", "LSO", "NAM", "ZAF", "SWZ"]),
    (
        "Western Africa",
        &[
            "BEN", "BFA", "CPV", "CIV", "GMB", "GHA", "GNQ", "GNB", "LBR", "MLI", "MRT", "NER",
            "NGA", "SEN", "SLE", "TGO",
        ],
    ),
    (
        "Caribbean",
        &["ATG", "BHS", "BRB", "DMA", "DOM", "GRD", "HTI", "JAM", "PRI", "TTO"],
    ),
    (
        "Central America",
        &["BLZ", "CRI", "SLV", "GTM", "HND", "MEX", "NIC", "PAN"],
    ),
    (
        "South America",
        &[
            "ARG", "BOL", "BRA", "CHL", "COL", "ECU", "GUY", "PRY", "PER", "SUR", "URY", "VEN",
        ],
    ),
    ("Northern America", &["CAN", "USA"]),
    ("Central Asia", &["KAZ", "TJK", "TKM", "UZB"]),
    ("Eastern Asia", &["CHN", "HKG", "MAC", "KOR", "JPN", "MNG"]),
    (
        "Southern Asia",
        &["AFG", "BGD", "BTN", "IND", "IRN", "MDV", "NPL", "PAK", "LKA"],
    ),
    (
        "South-Eastern Asia",
        &[
            "BRN", "KHM", "IDN", "LAO", "MYS", "MMR", "PHL", "SGP", "THA", "TLS", "VNM",
        ],
    ),
    (
        "Western Asia",
        &[
            "ARM", "AZE", "BHR", "CYP", "GEO", "IRQ", "ISR", "JOR", "KWT", "LBN", "OMN", "QAT",
            "SAU", "SYR", "TUR", "ARE", "YEM",
        ],
    ),
    (
        "Eastern Europe",
        &["BLR", "BGR", "CZE", "HUN", "POL", "MDA", "ROU", "RUS", "SVK", "UKR"],
    ),
    (
        "Northern Europe",
        &["DNK", "EST", "FIN", "ISL", "IRL", "LVA", "LTU", "NOR", "SWE", "GBR"],
    ),
    ("Nordic Countries", &["SWE", "NOR", "ISL", "FIN", "DNK"]),
    (
        "Southern Europe",
        &[
            "ALB", "BIH", "HRV", "GRC", "ITA", "MLT", "MNE", "PRT", "SMR", "SRB", "SVN", "ESP",
            "MKD",
        ],
    ),
    (
        "Western Europe",
        &["AUT", "BEL", "FRA", "DEU", "LUX", "NLD", "CHE"],
    ),
    ("Australia and New Zealand", &["AUS", "NZL"]),
    ("Melanesia", &["FJI", "PNG", "SLB", "VUT"]),
    ("Micronesia", &["KIR", "MHL", "FSM", "PLW"]),
    ("Polynesia", &["WSM", "TON", "TUV"]),
    (
        "Opec Countries",
        &[
            "DZA", "AGO", "ECU", "IRN", "IRQ", "KWT", "LBY", "NGA", "QAT", "SAU", "ARE", "VEN",
        ],
    ),
    (
        "G8 Countries",
        &["JPN", "RUS", "USA", "GBR", "ITA", "DEU", "CAN", "FRA"],
    ),
    ("BRICS Countries", &["RUS", "CHN", "IND", "BRA", "ZAF"]),
];

/// Region names in table order, for populating a selector.
pub fn region_names() -> Vec<&'static str> {
    REGIONS.iter().map(|(name, _)| *name).collect()
}

/// Member codes of `name`, duplicates removed. Unknown names yield nothing.
pub fn resolve_region(name: &str) -> Vec<&'static str> {
    let Some((_, members)) = REGIONS.iter().find(|(n, _)| *n == name) else {
        log::warn!("unknown region '{name}'");
        return Vec::new();
    };
    let mut seen = AHashSet::with_capacity(members.len());
    members.iter().copied().filter(|c| seen.insert(*c)).collect()
}
