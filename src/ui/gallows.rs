use crate::scoring::HangmanPart;

const FRAME: [&str; 7] = [
    "  +---+  ",
    "  |   |  ",
    "      |  ",
    "      |  ",
    "      |  ",
    "      |  ",
    "=========",
];

/// (row, column, glyph) of each body part inside [`FRAME`].
fn strokes(part: HangmanPart) -> &'static [(usize, usize, char)] {
    match part {
        HangmanPart::Head => &[(2, 2, 'O')],
        HangmanPart::Body => &[(3, 2, '|'), (4, 2, '|')],
        HangmanPart::LeftArm => &[(3, 1, '/')],
        HangmanPart::RightArm => &[(3, 3, '\\')],
        HangmanPart::LeftLeg => &[(5, 1, '/')],
        HangmanPart::RightLeg => &[(5, 3, '\\')],
    }
}

/// ASCII gallows with the parts earned by `wrong_count` misses drawn in.
pub fn gallows_lines(wrong_count: u32) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = FRAME.iter().map(|r| r.chars().collect()).collect();
    for part in HangmanPart::visible(wrong_count) {
        for &(row, col, glyph) in strokes(*part) {
            rows[row][col] = glyph;
        }
    }
    rows.into_iter().map(|r| r.into_iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_gallows() {
        let lines = gallows_lines(0);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2], "      |  ");
    }

    #[test]
    fn test_head_then_body() {
        assert_eq!(gallows_lines(1)[2], "  O   |  ");
        let two = gallows_lines(2);
        assert_eq!(two[3], "  |   |  ");
        assert_eq!(two[4], "  |   |  ");
    }

    #[test]
    fn test_full_figure() {
        let lines = gallows_lines(6);
        assert_eq!(lines[2], "  O   |  ");
        assert_eq!(lines[3], " /|\\  |  ");
        assert_eq!(lines[4], "  |   |  ");
        assert_eq!(lines[5], " / \\  |  ");
    }

    #[test]
    fn test_extra_misses_draw_nothing_more() {
        assert_eq!(gallows_lines(9), gallows_lines(6));
    }
}
