//! 全栈端到端测试：毫米请求 → 线上 ASCII 命令
//!
//! 仿真设备实现协议的线上行为（CR 切分、回显、`>` 结尾），
//! 状态应答由每个测试注入的有状态闭包决定。

use parking_lot::Mutex;
use std::io::{Read, Write};
use std::net::{Ipv4Addr, TcpListener};
use std::sync::Arc;
use std::time::Duration;
use xenax_sdk::prelude::*;

/// 进程内仿真设备：单连接，按 CR 切分命令，逐条应答
struct FakeDevice {
    ip: Ipv4Addr,
    port: u16,
    commands: Arc<Mutex<Vec<String>>>,
}

impl FakeDevice {
    fn spawn<F>(mut respond: F) -> Self
    where
        F: FnMut(&str) -> String + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let commands = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&commands);

        std::thread::spawn(move || {
            let (mut peer, _) = match listener.accept() {
                Ok(p) => p,
                Err(_) => return,
            };
            let mut buffer = Vec::new();
            let mut chunk = [0u8; 64];
            loop {
                let received = match peer.read(&mut chunk) {
                    Ok(0) | Err(_) => return,
                    Ok(n) => n,
                };
                buffer.extend_from_slice(&chunk[..received]);
                while let Some(pos) = buffer.iter().position(|b| *b == b'\r') {
                    let line: Vec<u8> = buffer.drain(..=pos).collect();
                    let command = String::from_utf8_lossy(&line[..line.len() - 1]).to_string();
                    log.lock().push(command.clone());
                    let reply = respond(&command);
                    if peer.write_all(reply.as_bytes()).is_err() {
                        return;
                    }
                }
            }
        });

        Self {
            ip: Ipv4Addr::LOCALHOST,
            port,
            commands,
        }
    }

    fn commands(&self) -> Vec<String> {
        self.commands.lock().clone()
    }
}

fn connect_controller(device: &FakeDevice, config: AxisConfiguration) -> XenaxAxisController {
    let driver = Arc::new(XenaxAxisDriver::new(device.ip, device.port));
    driver.connect(Duration::from_millis(500)).unwrap();
    XenaxAxisController::new("e2e-axis", 0, driver, config)
}

fn fast_config() -> AxisConfiguration {
    AxisConfiguration {
        timeout: Duration::from_millis(200),
        move_poll_interval: Duration::from_millis(10),
        init_poll_interval: Duration::from_millis(5),
        ..AxisConfiguration::default()
    }
}

/// 测试绝对移动全链路：10.0 mm、50% 速度 ⇒ 曲线 + 限位 + G10000
#[test]
fn test_move_abs_wait_full_wire_sequence() {
    let mut motion_polls = 0;
    let device = FakeDevice::spawn(move |cmd| match cmd {
        "TPSR" => {
            motion_polls += 1;
            // 前两次轮询在动（0x6: Home + InMotion），之后静止（0x2: Home）
            if motion_polls <= 2 {
                "TPSR6>".to_string()
            } else {
                "TPSR2>".to_string()
            }
        }
        other => format!("{other}>"),
    });
    let controller = connect_controller(&device, fast_config());

    controller
        .move_abs_wait(10.0, 50.0, &CancelToken::new())
        .unwrap();

    let commands = device.commands();
    assert_eq!(
        &commands[..6],
        ["SP50000", "AC1000000", "SCRV100", "SLPN0", "SLPP800000", "G10000"]
    );
    // 余下全部是完成轮询，且没有任何停止命令
    assert!(commands[6..].iter().all(|c| c == "TPSR"));
    assert!(!commands.contains(&"SM".to_string()));
}

/// 测试超时全链路：轴一直在动 ⇒ 恰好一次 SM，随后 Timeout
#[test]
fn test_timeout_issues_single_stop_on_wire() {
    let device = FakeDevice::spawn(|cmd| match cmd {
        "TPSR" => "TPSR6>".to_string(),
        other => format!("{other}>"),
    });
    let controller = connect_controller(&device, fast_config());

    let err = controller
        .move_abs_wait(1.0, 100.0, &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, ControllerError::Timeout { .. }));

    let stops = device.commands().iter().filter(|c| *c == "SM").count();
    assert_eq!(stops, 1);
}

/// 测试取消全链路：预先取消的令牌 ⇒ 恰好一次 SM，错误是 Cancelled
#[test]
fn test_cancel_issues_single_stop_on_wire() {
    let device = FakeDevice::spawn(|cmd| match cmd {
        "TPSR" => "TPSR6>".to_string(),
        other => format!("{other}>"),
    });
    let controller = connect_controller(&device, fast_config());

    let token = CancelToken::new();
    token.cancel();

    let err = controller.move_abs_wait(1.0, 100.0, &token).unwrap_err();
    assert!(matches!(err, ControllerError::Cancelled { .. }));

    let stops = device.commands().iter().filter(|c| *c == "SM").count();
    assert_eq!(stops, 1);
}

/// 测试回零全链路：清零限位 → REF → 轮询 Home 标志
#[test]
fn test_initialize_wait_wire_sequence() {
    let mut home_polls = 0;
    let device = FakeDevice::spawn(move |cmd| match cmd {
        "TPSR" => {
            home_polls += 1;
            if home_polls <= 2 {
                "TPSR0>".to_string()
            } else {
                "TPSR2>".to_string()
            }
        }
        other => format!("{other}>"),
    });
    let controller = connect_controller(&device, fast_config());

    controller.initialize_wait(&CancelToken::new()).unwrap();

    let commands = device.commands();
    assert_eq!(&commands[..3], ["SLPN0", "SLPP0", "REF"]);
    assert!(commands[3..].iter().all(|c| c == "TPSR"));
}

/// 测试位置读回折算：TP 应答 4242 脉冲 ⇒ 4.242 mm
#[test]
fn test_position_readback_in_millimetres() {
    let device = FakeDevice::spawn(|cmd| match cmd {
        "TP" => "TP4242>".to_string(),
        other => format!("{other}>"),
    });
    let controller = connect_controller(&device, fast_config());

    let position = controller.position().unwrap();
    assert!((position - 4.242).abs() < 1e-9);
}

/// 测试设备忙应答沿全链路向上传播
#[test]
fn test_device_busy_propagates_through_stack() {
    let device = FakeDevice::spawn(|cmd| match cmd {
        "G1000" => "G1000#3>".to_string(),
        "TPSR" => "TPSR2>".to_string(),
        other => format!("{other}>"),
    });
    let controller = connect_controller(&device, fast_config());

    let err = controller.move_abs(1.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Driver(DriverError::Protocol(_))
    ));
}
