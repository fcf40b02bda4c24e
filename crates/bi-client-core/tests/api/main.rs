mod helpers;
mod login;
mod reports;
mod resources;
mod session_restore;
