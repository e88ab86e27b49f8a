// Skill gap matching: resume skills vs job skills → coverage score and hints.
// Pure computation; handlers only resolve which resume and job to compare.

pub mod analyzer;
pub mod handlers;
pub mod skills;
