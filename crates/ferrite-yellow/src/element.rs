#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }
}

/// Tokens touching an offset. An offset on the boundary of two tokens
/// touches both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenAtOffset<T> {
    None,
    Single(T),
    Between(T, T),
}

impl<T> TokenAtOffset<T> {
    pub fn map<U>(self, f: impl Fn(T) -> U) -> TokenAtOffset<U> {
        match self {
            Self::None => TokenAtOffset::None,
            Self::Single(it) => TokenAtOffset::Single(f(it)),
            Self::Between(left, right) => TokenAtOffset::Between(f(left), f(right)),
        }
    }

    /// The token ending at the offset when there are two.
    pub fn left_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(it) | Self::Between(it, _) => Some(it),
        }
    }

    /// The token starting at the offset when there are two.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(it) | Self::Between(_, it) => Some(it),
        }
    }
}
