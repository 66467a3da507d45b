use anyhow::Result;
use polars::prelude::*;

use crate::taxonomy::regions;

/// Demo table keyed by county code: population and GDP per capita.
pub fn sample_codes() -> Result<DataFrame> {
    let codes = regions().iter().map(|region| region.code).collect::<Vec<_>>();
    Ok(df!(
        "lan_kod" => codes,
        "befolkning" => [
            2396599i64, 395026, 299401, 468387, 365010, 201469, 245446,
            61001, 158453, 1402425, 339367, 1744859, 282414, 304805,
            278967, 287966, 287502, 244193, 132054, 274154, 249693,
        ],
        "bnp_per_capita" => [
            650000i64, 400000, 380000, 390000, 420000, 370000, 360000,
            380000, 350000, 420000, 390000, 450000, 350000, 380000,
            390000, 360000, 350000, 370000, 380000, 400000, 410000,
        ]
    )?)
}

/// Demo table keyed by county name: unemployment rate in percent.
pub fn sample_names() -> Result<DataFrame> {
    let names = regions().iter().map(|region| region.name).collect::<Vec<_>>();
    Ok(df!(
        "lan_namn" => names,
        "arbetslöshet" => [
            6.2, 7.1, 8.3, 7.9, 6.5, 8.2, 7.8, 6.9, 8.5,
            9.2, 6.7, 7.0, 7.6, 7.4, 8.1, 7.3, 9.0, 8.4,
            7.2, 6.8, 7.7,
        ]
    )?)
}
