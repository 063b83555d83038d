//! Built-in demo line: Kochi Metro Line 1, Aluva to Petta.

use geo::Point;
use metro_track::{LineDefinition, StationRecord};

/// The default line used when no definition file is given.
pub fn line_one() -> LineDefinition {
    let stations = [
        ("aluva", "Aluva", 76.3530, 10.1102),
        ("pulinchode", "Pulinchode", 76.3445, 10.0987),
        ("companypady", "Companypady", 76.3420, 10.0913),
        ("ambattukavu", "Ambattukavu", 76.3392, 10.0839),
        ("muttom", "Muttom", 76.3336, 10.0727),
        ("kalamassery", "Kalamassery", 76.3302, 10.0616),
        ("cusat", "Cochin University", 76.3183, 10.0466),
        ("pathadipalam", "Pathadipalam", 76.3143, 10.0359),
        ("edapally", "Edapally", 76.3083, 10.0249),
        ("changampuzha-park", "Changampuzha Park", 76.3022, 10.0156),
        ("palarivattom", "Palarivattom", 76.3046, 10.0064),
        ("jln-stadium", "JLN Stadium", 76.3010, 9.9973),
        ("kaloor", "Kaloor", 76.2916, 9.9938),
        ("town-hall", "Town Hall", 76.2882, 9.9903),
        ("mg-road", "MG Road", 76.2822, 9.9826),
        ("maharajas", "Maharaja's College", 76.2850, 9.9735),
        ("ernakulam-south", "Ernakulam South", 76.2891, 9.9685),
        ("kadavanthra", "Kadavanthra", 76.2982, 9.9651),
        ("elamkulam", "Elamkulam", 76.3060, 9.9610),
        ("vyttila", "Vyttila", 76.3182, 9.9645),
        ("thaikoodam", "Thaikoodam", 76.3204, 9.9540),
        ("petta", "Petta", 76.3262, 9.9470),
    ];

    LineDefinition::new(
        "kochi-line-1",
        "Kochi Metro Line 1",
        stations
            .iter()
            .map(|(id, name, lng, lat)| StationRecord::new(*id, name, Point::new(*lng, *lat)))
            .collect(),
    )
}
