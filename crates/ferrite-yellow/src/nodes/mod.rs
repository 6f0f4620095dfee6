mod node;
mod token;
mod tree;

pub(crate) use node::{Child, Node};
pub(crate) use token::{AttachedTrivia, Token};
pub(crate) use tree::TreeInner;
