#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Pixels per lattice cell when rendering to an image.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Scale(pub usize);
