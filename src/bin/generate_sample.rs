//! Writes a synthetic OWID-style emissions CSV plus a matching codebook so
//! the app can be tried without downloading the real dataset.

use std::error::Error;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (name, total co2 around 2020 in Mt, population in millions)
const COUNTRIES: &[(&str, f64, f64)] = &[
    ("World", 36000.0, 7800.0),
    ("China", 10600.0, 1410.0),
    ("United States", 4700.0, 331.0),
    ("India", 2400.0, 1380.0),
    ("Germany", 640.0, 83.0),
    ("Brazil", 470.0, 213.0),
];

/// Fuel shares of total co2: coal, oil, gas, flaring, other industry.
const FUEL_SHARES: [(&str, f64); 5] = [
    ("coal_co2", 0.40),
    ("oil_co2", 0.32),
    ("gas_co2", 0.21),
    ("flaring_co2", 0.01),
    ("other_industry_co2", 0.04),
];

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);

    std::fs::create_dir_all("data")?;
    let mut writer = csv::Writer::from_path("data/owid-co2-data.csv")?;

    // Deliberately underscored, like the real OWID export; the loader
    // renames these to spaced column names.
    let mut header = vec![
        "country".to_string(),
        "year".to_string(),
        "population".to_string(),
        "gdp".to_string(),
        "co2".to_string(),
        "co2_per_capita".to_string(),
        "co2_growth_abs".to_string(),
        "consumption_co2".to_string(),
        "consumption_co2_per_capita".to_string(),
        "methane".to_string(),
        "methane_per_capita".to_string(),
        "nitrous_oxide".to_string(),
        "nitrous_oxide_per_capita".to_string(),
        "temperature_change_from_ghg".to_string(),
        "temperature_change_from_ch4".to_string(),
        "temperature_change_from_co2".to_string(),
        "temperature_change_from_n2o".to_string(),
    ];
    for (fuel, _) in FUEL_SHARES {
        header.push(fuel.to_string());
        header.push(format!("{fuel}_per_capita"));
    }
    writer.write_record(&header)?;

    let mut n_rows = 0u32;
    for &(country, co2_2020, pop_millions) in COUNTRIES {
        let mut prev_co2 = None;
        for year in 1990..=2023 {
            let t = (year - 1990) as f64;
            // Emissions grow towards the 2020 level with some noise.
            let growth = 0.55 + 0.015 * t;
            let co2 = co2_2020 * growth * (1.0 + rng.gauss(0.0, 0.02));
            let population = pop_millions * 1e6 * (1.0 + 0.008 * t);
            let gdp = population * (8_000.0 + 350.0 * t) * (1.0 + rng.gauss(0.0, 0.03));
            let per_capita = |total: f64| total * 1e6 / population;

            let methane = co2 * 0.22 * (1.0 + rng.gauss(0.0, 0.03));
            let nitrous = co2 * 0.06 * (1.0 + rng.gauss(0.0, 0.03));
            let consumption = co2 * (1.0 + rng.gauss(0.0, 0.05));
            let warming = co2 / 36000.0 * (0.8 + 0.01 * t);

            let mut row = vec![
                country.to_string(),
                year.to_string(),
                format!("{population:.0}"),
                format!("{gdp:.0}"),
                format!("{co2:.3}"),
                format!("{:.3}", per_capita(co2)),
                match prev_co2 {
                    Some(p) => format!("{:.3}", co2 - p),
                    // First year has no growth figure, like the real data.
                    None => String::new(),
                },
                format!("{consumption:.3}"),
                format!("{:.3}", per_capita(consumption)),
                format!("{methane:.3}"),
                format!("{:.3}", per_capita(methane)),
                format!("{nitrous:.3}"),
                format!("{:.3}", per_capita(nitrous)),
                format!("{:.4}", warming),
                format!("{:.4}", warming * 0.25),
                format!("{:.4}", warming * 0.65),
                format!("{:.4}", warming * 0.10),
            ];
            for &(_, share) in &FUEL_SHARES {
                let fuel_total = co2 * share * (1.0 + rng.gauss(0.0, 0.02));
                row.push(format!("{fuel_total:.3}"));
                row.push(format!("{:.3}", per_capita(fuel_total)));
            }
            writer.write_record(&row)?;

            prev_co2 = Some(co2);
            n_rows += 1;
        }
    }
    writer.flush()?;

    write_codebook()?;

    println!(
        "Wrote {n_rows} rows for {} countries to data/owid-co2-data.csv",
        COUNTRIES.len()
    );
    Ok(())
}

fn write_codebook() -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path("data/owid-co2-codebook.csv")?;
    writer.write_record(["column", "description", "unit", "source"])?;

    let entries = [
        ("country", "Geographic location", "", "Our World in Data"),
        ("year", "Year of observation", "", "Our World in Data"),
        ("population", "Population", "persons", "Synthetic sample"),
        ("gdp", "Gross domestic product", "international-$", "Synthetic sample"),
        ("co2", "Annual CO2 emissions", "million tonnes", "Synthetic sample"),
        ("co2_per_capita", "Annual CO2 emissions per person", "tonnes", "Synthetic sample"),
        ("co2_growth_abs", "Year-on-year change in CO2 emissions", "million tonnes", "Synthetic sample"),
        ("coal_co2", "Annual CO2 emissions from coal", "million tonnes", "Synthetic sample"),
        ("oil_co2", "Annual CO2 emissions from oil", "million tonnes", "Synthetic sample"),
        ("gas_co2", "Annual CO2 emissions from gas", "million tonnes", "Synthetic sample"),
        ("flaring_co2", "Annual CO2 emissions from flaring", "million tonnes", "Synthetic sample"),
        ("methane", "Annual methane emissions (CO2eq)", "million tonnes", "Synthetic sample"),
        ("nitrous_oxide", "Annual nitrous oxide emissions (CO2eq)", "million tonnes", "Synthetic sample"),
        ("temperature_change_from_ghg", "Warming contribution from greenhouse gases", "°C", "Synthetic sample"),
    ];
    for (column, description, unit, source) in entries {
        writer.write_record([column, description, unit, source])?;
    }
    writer.flush()?;
    Ok(())
}
