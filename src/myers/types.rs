/// Alias for a vector of Edit
/// Result of the Myers diff function
pub type Diff = Vec<Edit>;

/// Each element in a diff refers to positions in the two sequences:
/// only in the old one (Delete)
/// only in the new one (Insert)
/// in both (Equal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(usize),
    Delete(usize),
    Equal(usize, usize),
}
