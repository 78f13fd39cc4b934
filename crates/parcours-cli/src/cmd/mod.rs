pub mod act;
pub mod case;
pub mod init;
pub mod message;
pub mod next;
pub mod notifications;
pub mod serve;
pub mod state;
pub mod timeline;
