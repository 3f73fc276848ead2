//! oncomatch-molecular: Background mutation statistics and the gene
//! driver-likelihood model for variants of unknown significance.

pub mod dnds;
pub mod likelihood;

pub use dnds::{DndsDatabase, DndsDriverGeneLikelihood, DndsDriverType, MutationBurden};
pub use likelihood::{GeneDriverLikelihood, GeneDriverLikelihoodModel};
