//! Shmancy iterator adapters

pub use chars::BadUnicode;

pub mod chars {
    //! The invalid-codepoint error shared by [`crate::event::Decoder`] and
    //! [`crate::error::ReplError`].

    /// Invalid unicode codepoint found while decoding input bytes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BadUnicode(pub u32);
    impl std::error::Error for BadUnicode {}
    impl std::fmt::Display for BadUnicode {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            let Self(code) = self;
            write!(f, "Bad unicode: {code}")
        }
    }
}
