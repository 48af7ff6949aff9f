use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

pub trait AreaExt {
    fn split_equal<const N: usize>(self, direction: Direction) -> [Rect; N];
    fn centered(self, width: u16, height: u16) -> Rect;
}

impl AreaExt for Rect {
    fn split_equal<const N: usize>(self, direction: Direction) -> [Rect; N] {
        let n = N as u32;
        let constraints = Constraint::from_ratios([(1, n); N]);
        match direction {
            Direction::Horizontal => Layout::horizontal(constraints).areas(self),
            Direction::Vertical => Layout::vertical(constraints).areas(self),
        }
    }

    fn centered(self, width: u16, height: u16) -> Rect {
        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(self);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        area
    }
}
