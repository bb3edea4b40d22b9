//! Integration tests driving the relver binary

mod helpers;
mod test_copy_version;
mod test_postinstall;
mod test_release;
mod test_show;
