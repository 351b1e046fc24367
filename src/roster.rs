use crate::model::Team;

// (name, country, strength, logo)
const DEFAULT_CLUBS: [(&str, &str, u8, &str); 12] = [
    (
        "Manchester City",
        "England",
        95,
        "https://upload.wikimedia.org/wikipedia/tr/f/f6/Manchester_City.png",
    ),
    (
        "Real Madrid",
        "Spain",
        96,
        "https://upload.wikimedia.org/wikipedia/tr/9/98/Real_Madrid.png",
    ),
    (
        "Bayern Munich",
        "Germany",
        94,
        "https://upload.wikimedia.org/wikipedia/commons/1/1b/FC_Bayern_M%C3%BCnchen_logo_%282017%29.svg",
    ),
    (
        "Paris Saint-Germain",
        "France",
        92,
        "https://upload.wikimedia.org/wikipedia/tr/thumb/f/f4/PSG_logosu.svg/281px-PSG_logosu.svg.png",
    ),
    (
        "Chelsea",
        "England",
        91,
        "https://upload.wikimedia.org/wikipedia/tr/0/0d/Chelsea_FC.png",
    ),
    (
        "Barcelona",
        "Spain",
        90,
        "https://upload.wikimedia.org/wikipedia/tr/thumb/4/47/FC_Barcelona.png/150px-FC_Barcelona.png",
    ),
    (
        "Liverpool",
        "England",
        93,
        "https://upload.wikimedia.org/wikipedia/tr/thumb/3/3f/150px-Liverpool_FC_logo.png/250px-150px-Liverpool_FC_logo.png",
    ),
    (
        "Juventus",
        "Italy",
        88,
        "https://upload.wikimedia.org/wikipedia/commons/thumb/a/a8/Juventus_FC_-_pictogram_black_%28Italy%2C_2017%29.svg/150px-Juventus_FC_-_pictogram_black_%28Italy%2C_2017%29.svg.png",
    ),
    (
        "Beşiktaş",
        "Turkey",
        80,
        "https://upload.wikimedia.org/wikipedia/commons/thumb/2/20/Logo_of_Be%C5%9Fikta%C5%9F_JK.svg/220px-Logo_of_Be%C5%9Fikta%C5%9F_JK.svg.png",
    ),
    (
        "Galatasaray",
        "Turkey",
        83,
        "https://upload.wikimedia.org/wikipedia/commons/thumb/3/37/Galatasaray_Star_Logo.png/800px-Galatasaray_Star_Logo.png",
    ),
    (
        "Fenerbahçe",
        "Turkey",
        82,
        "https://upload.wikimedia.org/wikipedia/tr/thumb/8/86/Fenerbah%C3%A7e_SK.png/150px-Fenerbah%C3%A7e_SK.png",
    ),
    (
        "Trabzonspor",
        "Turkey",
        79,
        "https://upload.wikimedia.org/wikipedia/tr/thumb/a/ab/TrabzonsporAmblemi.png/150px-TrabzonsporAmblemi.png",
    ),
];

/// The twelve clubs a fresh league starts with, ids 1..=12.
pub fn default_roster() -> Vec<Team> {
    DEFAULT_CLUBS
        .iter()
        .enumerate()
        .map(|(idx, (name, country, strength, logo))| Team {
            id: idx as u32 + 1,
            name: (*name).to_string(),
            country: (*country).to_string(),
            logo: (*logo).to_string(),
            strength: *strength,
        })
        .collect()
}

/// Synthetic clubs for replays and benches: `count` teams with ratings spread over 50..=95.
pub fn synthetic_roster(count: usize) -> Vec<Team> {
    (0..count)
        .map(|idx| {
            let spread = if count > 1 {
                45 * idx / (count - 1)
            } else {
                0
            };
            Team {
                id: idx as u32 + 1,
                name: format!("Club {}", idx + 1),
                country: "Nowhere".to_string(),
                logo: String::new(),
                strength: (95 - spread) as u8,
            }
        })
        .collect()
}
