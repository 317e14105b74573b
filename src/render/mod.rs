//! 查看报告的两种展示方式：终端 (ANSI) 与 HTML 页面

pub mod html;
pub mod terminal;
