pub mod catalog;
pub mod lexical;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod resolver;
pub mod word_bank;
