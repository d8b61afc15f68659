//! Text analysis helpers for editors choosing tags.
//!
//! # Submodules
//!
//! - [`tokenize`]: distinct content words of a text
//! - [`conjugate`]: naive Slovene declension of candidate tags
//! - [`frequency`]: weighted word counts across articles or comments
//! - [`stopwords`]: the word lists frequency counts leave out
//! - [`suggest`]: ranked name, abbreviation and phrase candidates per article

pub mod conjugate;
pub mod frequency;
pub mod stopwords;
pub mod suggest;
pub mod tokenize;
