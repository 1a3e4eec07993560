/// The fixed color of each piece kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlockColor {
    Cyan,
    Gray,
    Red,
    Green,
    Magenta,
    Blue,
    Orange,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(BlockColor),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(&self) -> Option<BlockColor> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(*color),
        }
    }
}
