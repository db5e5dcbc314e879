#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Depth(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct AttemptsCount(pub usize);
