#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSign {
    Negative,
    Zero,
    Positive,
}

impl AxisSign {
    /// NaN and signed zero both collapse to `Zero`.
    pub fn from_component(value: f32) -> Self {
        if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::Zero
        }
    }

    pub const fn as_f32(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Zero => 0.0,
            Self::Positive => 1.0,
        }
    }
}

/// Compass facing with its canonical angle, counter-clockwise from +x, positive y north.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    None,
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Direction::None,
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    pub const fn resolve(x_sign: AxisSign, y_sign: AxisSign) -> Self {
        match (x_sign, y_sign) {
            (AxisSign::Zero, AxisSign::Zero) => Self::None,
            (AxisSign::Positive, AxisSign::Zero) => Self::East,
            (AxisSign::Positive, AxisSign::Positive) => Self::NorthEast,
            (AxisSign::Zero, AxisSign::Positive) => Self::North,
            (AxisSign::Negative, AxisSign::Positive) => Self::NorthWest,
            (AxisSign::Negative, AxisSign::Zero) => Self::West,
            (AxisSign::Negative, AxisSign::Negative) => Self::SouthWest,
            (AxisSign::Zero, AxisSign::Negative) => Self::South,
            (AxisSign::Positive, AxisSign::Negative) => Self::SouthEast,
        }
    }

    pub fn from_components(x: f32, y: f32) -> Self {
        Self::resolve(AxisSign::from_component(x), AxisSign::from_component(y))
    }

    pub const fn degree_angle(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::East => 0.0,
            Self::NorthEast => 45.0,
            Self::North => 90.0,
            Self::NorthWest => 135.0,
            Self::West => 180.0,
            Self::SouthWest => 225.0,
            Self::South => 270.0,
            Self::SouthEast => 315.0,
        }
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    pub fn unit_vector(self) -> (f32, f32) {
        let radians = self.degree_angle().to_radians();
        (radians.cos(), radians.sin())
    }
}
