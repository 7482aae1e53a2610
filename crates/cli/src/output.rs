//! Terminal output.
//!
//! Rendered views go to stdout; error notices go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use kanap_storefront::{Notice, NoticeLevel};

/// Print a rendered view.
pub fn view(rendered: &str) {
    println!("{}", rendered.trim_end());
}

/// Print a notice on the channel matching its level.
pub fn notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => println!("{}", notice.message),
        NoticeLevel::Error => eprintln!("{}", notice.message),
    }
}
