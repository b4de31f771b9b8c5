// Application layer - Use case interactors

pub mod container;
pub mod embed_interactor;

// Re-export interactors
pub use embed_interactor::{EmbedInteractor, EmbedJob, EmbedReport, PreparedEmbed};
