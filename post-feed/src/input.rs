/// 交互模式下的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// 搜索框输入
    Search(String),
    /// `:tag NAME on|off`
    Tag { name: String, enabled: bool },
    /// `:clear`
    Clear,
    /// `:quit`
    Quit,
    /// 无法识别的命令
    Unknown(String),
}

impl InputCommand {
    /// 解析一行输入，不以 `:` 开头的内容都视为搜索框输入
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return InputCommand::Search(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("clear"), None, _, _) => InputCommand::Clear,
            (Some("quit") | Some("q"), None, _, _) => InputCommand::Quit,
            (Some("tag"), Some(name), state, None) => match state {
                None | Some("on") => InputCommand::Tag {
                    name: name.to_string(),
                    enabled: true,
                },
                Some("off") => InputCommand::Tag {
                    name: name.to_string(),
                    enabled: false,
                },
                Some(_) => InputCommand::Unknown(line.to_string()),
            },
            _ => InputCommand::Unknown(line.to_string()),
        }
    }
}
