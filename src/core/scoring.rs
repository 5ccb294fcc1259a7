/// Points per category/need keyword hit on the Play Board
pub const PLAY_BOARD_POINTS: u32 = 2;

/// Points per category/need overlap on the tailored recommendations page
pub const TAILORED_POINTS: u32 = 10;

/// Category keyword each need looks for on the Play Board
pub const NEED_KEYWORDS: [(&str, &str); 5] = [
    ("accessible-storage", "storage"),
    ("fine-motor-mark-making", "fine motor"),
    ("gross-motor-climb", "gross motor"),
    ("nurturing-dolls", "doll"),
    ("building-foundations", "building"),
];

pub fn need_keyword(need: &str) -> Option<&'static str> {
    NEED_KEYWORDS
        .iter()
        .find(|(id, _)| *id == need)
        .map(|(_, keyword)| *keyword)
}

/// Play Board relevance: +2 for every (category, need) pair where the
/// lowercased category contains the need's keyword. Uncapped.
pub fn play_board_relevance(categories: &[String], needs: &[String]) -> u32 {
    let keywords: Vec<&str> = needs.iter().filter_map(|n| need_keyword(n)).collect();

    categories
        .iter()
        .map(|category| {
            let category = category.to_lowercase();
            keywords
                .iter()
                .filter(|keyword| category.contains(*keyword))
                .count() as u32
                * PLAY_BOARD_POINTS
        })
        .sum()
}

/// Tailored relevance: +10 for every (category, need) pair where either
/// lowercased string contains the other.
pub fn tailored_relevance(categories: &[String], needs: &[String]) -> u32 {
    let needs: Vec<String> = needs.iter().map(|n| n.to_lowercase()).collect();
    let mut score = 0;

    for category in categories.iter().map(|c| c.to_lowercase()) {
        for need in &needs {
            if category.contains(need.as_str()) || need.contains(category.as_str()) {
                score += TAILORED_POINTS;
            }
        }
    }

    score
}
