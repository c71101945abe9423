//! Resource façades over [`AppelloClient`](crate::AppelloClient).

pub mod companies;

pub use companies::Companies;
