//! Small WEO export and reference table written into a temp dir.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

const NAMED: [&str; 8] = [
    "ISO",
    "WEO Subject Code",
    "Country",
    "Subject Descriptor",
    "Subject Notes",
    "Units",
    "Scale",
    "Country/Series-specific Notes",
];

fn weo_row(iso: &str, subject: &str, country: &str, descriptor: &str, units: &str, scale: &str, cells: &[(i32, &str)]) -> String {
    let mut fields: Vec<String> = vec![
        iso.into(),
        subject.into(),
        country.into(),
        descriptor.into(),
        "Notes".into(),
        units.into(),
        scale.into(),
        "See notes".into(),
    ];
    for year in 1980..=2015 {
        let raw = cells
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        fields.push(raw);
    }
    fields.push("2014".into());
    fields.join("\t")
}

/// WEO text: VEN and USA current account (BCA), DEU BCA, USA GDP growth, and a footer.
pub fn weo_text() -> String {
    let mut header: Vec<String> = NAMED.iter().map(|s| s.to_string()).collect();
    header.extend((1980..=2015).map(|y| y.to_string()));
    header.push("Estimates Start After".into());

    let bca = ("Current account balance", "U.S. dollars", "Billions");
    let lines = [
        header.join("\t"),
        weo_row("VEN", "BCA", "Venezuela", bca.0, bca.1, bca.2, &[(1980, "-100"), (1990, "-200")]),
        weo_row("USA", "BCA", "United States", bca.0, bca.1, bca.2, &[(1980, "50")]),
        weo_row("DEU", "BCA", "Germany", bca.0, bca.1, bca.2, &[(1985, "1,234.5"), (2010, "200")]),
        weo_row(
            "USA",
            "NGDP_RPCH",
            "United States",
            "Gross domestic product, constant prices",
            "Percent change",
            "",
            &[(2000, "4.1"), (2001, "1.0")],
        ),
        String::new(),
        "International Monetary Fund, World Economic Outlook Database, October 2016".into(),
    ];
    lines.join("\n")
}

pub fn ref_text() -> String {
    [
        "Country Code\tShort Name\tLong Name",
        "VEN\tVenezuela, RB\tRepública Bolivariana de Venezuela",
        "USA\tUnited States\tUnited States of America",
        "DEU\tGermany\tFederal Republic of Germany",
    ]
    .join("\n")
}

/// Write both files into `dir`; returns (weo path, reference path).
pub fn write_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let weo = dir.join("weo.tsv");
    let refs = dir.join("countries.tsv");
    fs::write(&weo, weo_text()).unwrap();
    fs::write(&refs, ref_text()).unwrap();
    (weo, refs)
}
