//! South African geography reference data
//!
//! Provinces with population weights, bounding boxes for coordinate
//! sampling, and per-province town names used to build facility and
//! district names.

/// Geographic bounding box (decimal degrees)
#[derive(Debug, Clone, Copy)]
pub struct ProvinceBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

/// One province with its population weight, bounds and towns
#[derive(Debug, Clone, Copy)]
pub struct Province {
    pub name: &'static str,
    /// Population share used to bias facilities, patients and visit volume
    pub weight: f64,
    pub bounds: ProvinceBounds,
    pub towns: &'static [&'static str],
}

const fn bounds(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> ProvinceBounds {
    ProvinceBounds {
        lat_min,
        lat_max,
        lon_min,
        lon_max,
    }
}

/// The nine provinces, ordered by population weight (descending).
/// Remainders in facility allocation go to the first two entries.
pub const PROVINCES: &[Province] = &[
    Province {
        name: "Gauteng",
        weight: 0.35,
        bounds: bounds(-26.7, -25.3, 27.0, 29.4),
        towns: &[
            "Johannesburg",
            "Pretoria",
            "Soweto",
            "Benoni",
            "Krugersdorp",
            "Vanderbijlpark",
            "Tembisa",
            "Randburg",
        ],
    },
    Province {
        name: "Western Cape",
        weight: 0.25,
        bounds: bounds(-34.83, -30.67, 18.0, 26.0),
        towns: &[
            "Cape Town",
            "Stellenbosch",
            "Paarl",
            "George",
            "Worcester",
            "Mossel Bay",
            "Knysna",
            "Oudtshoorn",
        ],
    },
    Province {
        name: "KwaZulu-Natal",
        weight: 0.15,
        bounds: bounds(-29.5, -27.0, 29.0, 32.8),
        towns: &[
            "Durban",
            "Pietermaritzburg",
            "Richards Bay",
            "Newcastle",
            "Ladysmith",
            "Empangeni",
            "Port Shepstone",
            "Ulundi",
        ],
    },
    Province {
        name: "Eastern Cape",
        weight: 0.08,
        bounds: bounds(-34.1, -29.0, 22.6, 30.0),
        towns: &[
            "Gqeberha",
            "East London",
            "Mthatha",
            "Makhanda",
            "Queenstown",
            "Uitenhage",
            "King William's Town",
            "Graaff-Reinet",
        ],
    },
    Province {
        name: "Limpopo",
        weight: 0.06,
        bounds: bounds(-25.5, -22.1, 24.7, 31.5),
        towns: &[
            "Polokwane",
            "Thohoyandou",
            "Tzaneen",
            "Mokopane",
            "Musina",
            "Giyani",
            "Lephalale",
            "Bela-Bela",
        ],
    },
    Province {
        name: "Mpumalanga",
        weight: 0.05,
        bounds: bounds(-26.5, -23.5, 28.0, 31.7),
        towns: &[
            "Mbombela",
            "Witbank",
            "Middelburg",
            "Secunda",
            "Standerton",
            "Barberton",
            "Ermelo",
            "Sabie",
        ],
    },
    Province {
        name: "Free State",
        weight: 0.03,
        bounds: bounds(-30.7, -26.0, 24.7, 29.3),
        towns: &[
            "Bloemfontein",
            "Welkom",
            "Kroonstad",
            "Bethlehem",
            "Sasolburg",
            "Parys",
            "Harrismith",
            "Virginia",
        ],
    },
    Province {
        name: "North West",
        weight: 0.02,
        bounds: bounds(-27.5, -24.6, 24.5, 28.0),
        towns: &[
            "Mahikeng",
            "Rustenburg",
            "Klerksdorp",
            "Potchefstroom",
            "Brits",
            "Lichtenburg",
            "Vryburg",
            "Zeerust",
        ],
    },
    Province {
        name: "Northern Cape",
        weight: 0.01,
        bounds: bounds(-32.0, -20.0, 16.0, 24.0),
        towns: &[
            "Kimberley",
            "Upington",
            "Springbok",
            "Kuruman",
            "De Aar",
            "Colesberg",
            "Kathu",
            "Calvinia",
        ],
    },
];

/// Looks up a province by name
pub fn province_by_name(name: &str) -> Option<&'static Province> {
    PROVINCES.iter().find(|p| p.name == name)
}

/// Weight for a province name, falling back to a small default
pub fn province_weight(name: &str) -> f64 {
    province_by_name(name).map(|p| p.weight).unwrap_or(0.05)
}
