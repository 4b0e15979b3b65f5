//! Approximate road distances between the Korean Red Cross blood centres.
//!
//! Region names in the source data are padded with inner spaces
//! (`"경    기"`), so every lookup goes through [`normalize_region`].

/// Blood-centre regions, in matrix order.
pub const REGIONS: [&str; 13] = [
    "서울중앙",
    "인천",
    "경기",
    "강원",
    "대전.세종.충남",
    "충북",
    "전북",
    "광주.전남",
    "대구.경북",
    "부산",
    "울산",
    "경남",
    "제주",
];

/// Symmetric distance matrix in km, indexed like [`REGIONS`].
const DISTANCE_KM: [[u16; 13]; 13] = [
    [0, 30, 40, 120, 160, 120, 240, 320, 300, 400, 420, 380, 450],
    [30, 0, 50, 150, 190, 150, 270, 350, 330, 430, 450, 410, 480],
    [40, 50, 0, 110, 150, 110, 230, 310, 290, 390, 410, 370, 440],
    [120, 150, 110, 0, 200, 160, 280, 360, 340, 440, 460, 420, 490],
    [160, 190, 150, 200, 0, 50, 100, 150, 140, 240, 260, 220, 290],
    [120, 150, 110, 160, 50, 0, 120, 200, 180, 280, 300, 260, 330],
    [240, 270, 230, 280, 100, 120, 0, 80, 150, 250, 270, 230, 300],
    [320, 350, 310, 360, 150, 200, 80, 0, 200, 200, 220, 180, 250],
    [300, 330, 290, 340, 140, 180, 150, 200, 0, 100, 80, 100, 170],
    [400, 430, 390, 440, 240, 280, 250, 200, 100, 0, 30, 50, 120],
    [420, 450, 410, 460, 260, 300, 270, 220, 80, 30, 0, 40, 110],
    [380, 410, 370, 420, 220, 260, 230, 180, 100, 50, 40, 0, 70],
    [450, 480, 440, 490, 290, 330, 300, 250, 170, 120, 110, 70, 0],
];

pub const JEJU: &str = "제주";

/// Added to any leg that starts or ends in Jeju (ferry or air freight).
pub const JEJU_PENALTY_KM: f64 = 200.0;

/// Longest leg considered for a transfer.
pub const MAX_TRANSFER_DISTANCE_KM: f64 = 500.0;

/// Strips all whitespace from a region name.
pub fn normalize_region(region: &str) -> String {
    region.chars().filter(|c| !c.is_whitespace()).collect()
}

fn index_of(region: &str) -> Option<usize> {
    let normalized = normalize_region(region);
    REGIONS.iter().position(|r| *r == normalized)
}

fn is_jeju(region: &str) -> bool {
    normalize_region(region) == JEJU
}

/// Distance in km including the Jeju penalty. `None` for unknown regions.
pub fn distance(from: &str, to: &str) -> Option<f64> {
    let (i, j) = (index_of(from)?, index_of(to)?);
    let mut km = f64::from(DISTANCE_KM[i][j]);
    if i != j && (is_jeju(from) || is_jeju(to)) {
        km += JEJU_PENALTY_KM;
    }
    Some(km)
}

/// Whether blood can be moved between two regions.
///
/// Jeju is isolated and never takes part in a transfer.
pub fn is_transfer_feasible(from: &str, to: &str) -> bool {
    let Some(km) = distance(from, to) else {
        return false;
    };
    if km > MAX_TRANSFER_DISTANCE_KM {
        return false;
    }
    !(normalize_region(from) != normalize_region(to) && (is_jeju(from) || is_jeju(to)))
}

/// Regions reachable from `region`, nearest first.
pub fn nearby(region: &str) -> Vec<(&'static str, f64)> {
    let origin = normalize_region(region);
    let mut out: Vec<(&'static str, f64)> = REGIONS
        .iter()
        .filter(|other| **other != origin)
        .filter(|other| is_transfer_feasible(region, other))
        .filter_map(|other| distance(region, other).map(|km| (*other, km)))
        .collect();
    out.sort_by(|a, b| a.1.total_cmp(&b.1));
    out
}
