use serde::Serialize;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let idx = (self.next_f64() * items.len() as f64) as usize;
        &items[idx.min(items.len() - 1)]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// One CSV row; `None` serializes as an empty cell so the app's cleaner has
/// something to drop.
#[derive(Serialize)]
struct SampleRow {
    model_year: Option<i32>,
    fuel: Option<&'static str>,
    model: Option<String>,
    #[serde(rename = "type")]
    vehicle_type: Option<&'static str>,
    condition: Option<&'static str>,
    price: Option<f64>,
    odometer: Option<f64>,
    paint_color: Option<&'static str>,
}

struct Manufacturer {
    name: &'static str,
    /// Listing volume: some sit above the 1000-ad threshold, bmw exactly on
    /// it, the rest below, so the small-manufacturer toggle is observable.
    listings: usize,
    models: &'static [(&'static str, &'static str)],
    base_price: f64,
}

const MANUFACTURERS: &[Manufacturer] = &[
    Manufacturer {
        name: "chevrolet",
        listings: 1800,
        models: &[
            ("silverado 1500", "pickup"),
            ("malibu", "sedan"),
            ("tahoe", "SUV"),
            ("equinox", "SUV"),
            ("camaro", "coupe"),
        ],
        base_price: 28000.0,
    },
    Manufacturer {
        name: "ford",
        listings: 1500,
        models: &[
            ("f-150", "pickup"),
            ("focus", "sedan"),
            ("escape", "SUV"),
            ("mustang", "coupe"),
        ],
        base_price: 27000.0,
    },
    Manufacturer {
        name: "toyota",
        listings: 1200,
        models: &[
            ("camry", "sedan"),
            ("corolla", "sedan"),
            ("rav4", "SUV"),
            ("tacoma", "pickup"),
        ],
        base_price: 25000.0,
    },
    Manufacturer {
        name: "bmw",
        listings: 1000,
        models: &[("320i", "sedan"), ("x5", "SUV"), ("530i", "sedan")],
        base_price: 42000.0,
    },
    Manufacturer {
        name: "honda",
        listings: 700,
        models: &[("civic", "sedan"), ("accord", "sedan"), ("cr-v", "SUV")],
        base_price: 24000.0,
    },
    Manufacturer {
        name: "nissan",
        listings: 400,
        models: &[("altima", "sedan"), ("rogue", "SUV"), ("frontier", "pickup")],
        base_price: 23000.0,
    },
    Manufacturer {
        name: "subaru",
        listings: 250,
        models: &[("outback", "wagon"), ("forester", "SUV"), ("impreza", "sedan")],
        base_price: 26000.0,
    },
    Manufacturer {
        name: "volvo",
        listings: 120,
        models: &[("xc90", "SUV"), ("s60", "sedan"), ("v60", "wagon")],
        base_price: 38000.0,
    },
    Manufacturer {
        name: "tesla",
        listings: 60,
        models: &[("model 3", "sedan"), ("model s", "sedan"), ("model x", "SUV")],
        base_price: 55000.0,
    },
];

const CONDITIONS: &[&str] = &["excellent", "good", "good", "good", "fair", "like new", "salvage"];
const FUELS: &[&str] = &["gas", "gas", "gas", "gas", "diesel", "hybrid", "other"];
const PAINT_COLORS: &[&str] = &["white", "black", "silver", "blue", "red", "grey", "green"];

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "vehicles.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let mut rows = 0usize;
    for manufacturer in MANUFACTURERS {
        for _ in 0..manufacturer.listings {
            let &(model_name, vehicle_type) = rng.pick(manufacturer.models);
            let model_year = 1998 + (rng.next_f64().powf(0.6) * 24.0) as i32;
            let age = (2022 - model_year).max(0) as f64;

            let price = (manufacturer.base_price * 0.93_f64.powf(age)
                + rng.gauss(0.0, manufacturer.base_price * 0.08))
            .max(500.0)
            .round();
            let odometer = (age * 12000.0 + rng.gauss(0.0, 15000.0)).max(0.0).round();

            let fuel = if manufacturer.name == "tesla" {
                "electric"
            } else {
                *rng.pick(FUELS)
            };

            let mut row = SampleRow {
                model_year: Some(model_year),
                fuel: Some(fuel),
                model: Some(format!("{} {}", manufacturer.name, model_name)),
                vehicle_type: Some(vehicle_type),
                condition: Some(*rng.pick(CONDITIONS)),
                price: Some(price),
                odometer: Some(odometer),
                paint_color: rng.chance(0.85).then(|| *rng.pick(PAINT_COLORS)),
            };

            // ~2% of rows lose one required cell to exercise the cleaner.
            if rng.chance(0.02) {
                match (rng.next_f64() * 6.0) as usize {
                    0 => row.model_year = None,
                    1 => row.fuel = None,
                    2 => row.model = None,
                    3 => row.vehicle_type = None,
                    4 => row.condition = None,
                    _ => row.price = None,
                }
            }

            writer.serialize(&row).expect("Failed to write row");
            rows += 1;
        }
    }

    writer.flush().expect("Failed to flush CSV");
    println!("Wrote {rows} listings to {output_path}");
}
