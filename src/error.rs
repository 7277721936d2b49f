// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Failed to open the provided file.
    FileOpenFailed,

    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Failed to parse an XML data.
    ParsingFailed(roxmltree::Error),

    /// The root element is not `VisioDocument`, or its namespace is not
    /// one of the two recognized Visio schema revisions.
    UnsupportedRoot,
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::FileOpenFailed => {
                write!(f, "failed to open the provided file")
            }
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "XML data parsing failed cause {}", e)
            }
            Error::UnsupportedRoot => {
                write!(f, "the document is not a Visio XML document")
            }
        }
    }
}

impl std::error::Error for Error {}
