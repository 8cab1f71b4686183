mod color;
mod config;
mod widget;
