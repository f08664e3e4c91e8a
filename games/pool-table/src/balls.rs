//! Ball identities, animation channel names, and the fallback rack layout.

use glam::Vec2;

/// Identity of one of the sixteen balls on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallId {
    Cue,
    /// Object ball 1-15.
    Rank(u8),
}

/// All sixteen balls, cue first. Index in this array is the ball's slot
/// everywhere else in the crate.
pub const ALL_BALLS: [BallId; 16] = [
    BallId::Cue,
    BallId::Rank(1),
    BallId::Rank(2),
    BallId::Rank(3),
    BallId::Rank(4),
    BallId::Rank(5),
    BallId::Rank(6),
    BallId::Rank(7),
    BallId::Rank(8),
    BallId::Rank(9),
    BallId::Rank(10),
    BallId::Rank(11),
    BallId::Rank(12),
    BallId::Rank(13),
    BallId::Rank(14),
    BallId::Rank(15),
];

impl BallId {
    pub fn is_cue(self) -> bool {
        matches!(self, BallId::Cue)
    }

    /// Position in [`ALL_BALLS`].
    pub fn index(self) -> usize {
        match self {
            BallId::Cue => 0,
            BallId::Rank(n) => n as usize,
        }
    }

    /// Numeric rank; 0 for the cue ball.
    pub fn rank(self) -> u8 {
        match self {
            BallId::Cue => 0,
            BallId::Rank(n) => n,
        }
    }

    /// Prefix of the ball's X/Y channels in the animation asset.
    pub fn channel_prefix(self) -> String {
        match self {
            BallId::Cue => "CueBall".to_string(),
            BallId::Rank(n) => format!("{}Ball", n),
        }
    }

    pub fn x_channel(self) -> String {
        format!("{}X", self.channel_prefix())
    }

    pub fn y_channel(self) -> String {
        format!("{}Y", self.channel_prefix())
    }

    /// Scene tag for the ball's entity.
    pub fn tag(self) -> String {
        match self {
            BallId::Cue => "ball_cue".to_string(),
            BallId::Rank(n) => format!("ball_{}", n),
        }
    }
}

/// Standard 8-ball triangle rack layout.
/// Returns positions for balls 1-15 (index 0 = ball 1).
/// The apex points LEFT toward the cue ball, rows spread RIGHT.
///
/// ```text
///  1          <- apex (row 0)
///  9   2      <- row 1
///  3   8  10  <- row 2
/// 11  4  5  12 <- row 3
///  6 13 14  7 15 <- row 4
/// ```
pub fn rack_positions(apex: Vec2, ball_radius: f32) -> [Vec2; 15] {
    let gap = ball_radius * 2.0 + 1.0;
    let row_offset = gap * 0.866; // sqrt(3)/2 for equilateral triangle

    let mut positions = [Vec2::ZERO; 15];

    // (ball_number, row, vertical_offset)
    let layout: [(u8, usize, f32); 15] = [
        (1, 0, 0.0),
        (9, 1, -0.5), (2, 1, 0.5),
        (3, 2, -1.0), (8, 2, 0.0), (10, 2, 1.0),
        (11, 3, -1.5), (4, 3, -0.5), (5, 3, 0.5), (12, 3, 1.5),
        (6, 4, -2.0), (13, 4, -1.0), (14, 4, 0.0), (7, 4, 1.0), (15, 4, 2.0),
    ];

    for (ball_num, row, v_offset) in layout {
        let x = apex.x + (row as f32) * row_offset;
        let y = apex.y + v_offset * gap;
        positions[(ball_num - 1) as usize] = Vec2::new(x, y);
    }

    positions
}
