mod common;
mod similarity;
