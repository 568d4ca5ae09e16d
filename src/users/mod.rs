//! User-management endpoints (create, list, get-by-id, update, delete).
//! All of them sit behind the per-client rate gate.

pub mod handlers;
