//! REPL 命令解析。槽位编号对用户从 1 开始，这里转换为从 0 开始的下标。

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    Delete(usize),
    Next(usize),
    Prev(usize),
    Tag(String),
    Write,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line == ":q" || line == ":quit" || line == ":exit" {
        return Ok(Command::Quit);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "a" | "add" => Ok(Command::Add),
        "w" | "write" => Ok(Command::Write),
        "h" | "help" | "?" => Ok(Command::Help),
        "d" | "del" => parse_slot(rest).map(Command::Delete),
        "n" | "next" => parse_slot(rest).map(Command::Next),
        "p" | "prev" => parse_slot(rest).map(Command::Prev),
        "t" | "tag" if !rest.is_empty() => Ok(Command::Tag(rest.to_string())),
        "t" | "tag" => Err("用法：t <word>".to_string()),
        "" => Err("空命令，输入 h 查看帮助".to_string()),
        other => Err(format!("未知命令：{other}（输入 h 查看帮助）")),
    }
}

fn parse_slot(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("无效槽位：{s:?}（从 1 开始）")),
    }
}
