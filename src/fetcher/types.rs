use url::Url;

/// What kind of document a fetch expects; gates the accepted content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Html,
    Feed,
}

impl PageKind {
    pub fn accept_header(&self) -> &'static str {
        match self {
            Self::Html => "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            Self::Feed => "application/rss+xml,application/atom+xml,application/xml,text/xml;q=0.9",
        }
    }

    /// Content type assumed when the server sends none.
    pub fn assumed_content_type(&self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Feed => "application/xml",
        }
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        let ct = content_type.to_ascii_lowercase();
        match self {
            Self::Html => ct.contains("text/html") || ct.contains("application/xhtml"),
            Self::Feed => ct.contains("xml"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Windows1252,
    ShiftJis,
    Gbk,
    Big5,
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        use std::ptr;

        if ptr::eq(encoding, encoding_rs::UTF_8) {
            Self::Utf8
        } else if ptr::eq(encoding, encoding_rs::WINDOWS_1252) {
            Self::Windows1252
        } else if ptr::eq(encoding, encoding_rs::SHIFT_JIS) {
            Self::ShiftJis
        } else if ptr::eq(encoding, encoding_rs::GBK) || ptr::eq(encoding, encoding_rs::GB18030) {
            Self::Gbk
        } else if ptr::eq(encoding, encoding_rs::BIG5) {
            Self::Big5
        } else {
            Self::Other(encoding.name().to_string())
        }
    }

    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::ShiftJis => encoding_rs::SHIFT_JIS,
            Self::Gbk => encoding_rs::GBK,
            Self::Big5 => encoding_rs::BIG5,
            Self::Other(name) => {
                encoding_rs::Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8)
            }
        }
    }
}

/// A successfully fetched document, decoded to UTF-8.
#[derive(Debug)]
pub struct PageResponse {
    /// URL after redirects.
    pub url_final: Url,
    pub body_utf8: String,
}
