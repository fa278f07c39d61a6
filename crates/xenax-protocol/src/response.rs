//! 命令成帧与回显响应处理
//!
//! 实现协议的纯文本部分，不做任何 I/O：
//!
//! 1. 发送方向：命令追加 CR 后编码为 ASCII 字节。
//! 2. 接收方向：校验回显、剥离控制字符、分类错误标记。
//!
//! 传输层负责"读到 `>` 为止"的累积；这里只处理累积完成后的文本。

use crate::{DriverStatus, ProtocolError};

/// 命令终止符（发送方向）
pub const COMMAND_TERMINATOR: u8 = b'\r';

/// 响应终止符（接收方向），标记一个协议帧的结束
pub const RESPONSE_TERMINATOR: u8 = b'>';

/// 把命令编码为线上字节（追加 CR）
///
/// 命令本身不允许包含 CR，调用方保证传入的是单条命令 token。
pub fn frame_command(command: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(command.len() + 1);
    bytes.extend_from_slice(command.as_bytes());
    bytes.push(COMMAND_TERMINATOR);
    bytes
}

/// 处理一条完整的回显响应，返回清洗后的有效载荷
///
/// # 处理步骤
///
/// 1. 校验响应包含原始命令（设备总是回显收到的内容）；
///    不包含则返回 [`ProtocolError::EchoMismatch`]。
/// 2. 剥离回显的命令子串以及所有 `>`、CR、LF、NUL。
/// 3. 载荷含 `?` ⇒ [`ProtocolError::UnknownCommand`]。
/// 4. 载荷含 `#` ⇒ 解析其后数字为故障码，映射到 [`DriverStatus`]，
///    返回 [`ProtocolError::DeviceBusy`]。无法识别的码映射为
///    `DriverStatus::UnknownError`，从不静默忽略。
/// 5. 否则返回清洗后的载荷。
///
/// # 示例
///
/// ```
/// use xenax_protocol::process_response;
///
/// assert_eq!(process_response("TP1234>", "TP").unwrap(), "1234");
/// ```
pub fn process_response(raw: &str, command: &str) -> Result<String, ProtocolError> {
    if !raw.contains(command) {
        return Err(ProtocolError::EchoMismatch {
            sent: command.to_string(),
            received: raw.to_string(),
        });
    }

    // 剥离回显命令与协议控制字符
    let stripped = raw.replacen(command, "", 1);
    let processed: String = stripped
        .chars()
        .filter(|c| !matches!(c, '>' | '\r' | '\n' | '\0'))
        .collect();

    if processed.contains('?') {
        return Err(ProtocolError::UnknownCommand {
            command: command.to_string(),
        });
    }

    if processed.contains('#') {
        let digits = processed.replace('#', "");
        // 数字解析失败同样落入 UnknownError，不吞掉故障
        let code = digits.trim().parse::<i64>().unwrap_or(-1);
        return Err(ProtocolError::DeviceBusy {
            command: command.to_string(),
            status: DriverStatus::from_code(code),
        });
    }

    Ok(processed)
}
