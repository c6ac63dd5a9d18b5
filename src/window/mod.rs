// Prism Shell window layer
// One controller per native window plus the cross-window tab router.

pub mod controller;
pub mod router;
