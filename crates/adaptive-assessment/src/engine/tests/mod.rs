mod common;
mod routing;
mod scenario;
