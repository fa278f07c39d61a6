//! 基本运动演示
//!
//! 连接一台 XENAX 伺服控制器，回零后执行一次绝对移动并读回位置。
//! 需要真实设备（或在同一地址上仿真协议的服务）。

use clap::Parser;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use xenax_sdk::prelude::*;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "basic_motion_demo")]
#[command(about = "基本运动演示 - 回零、绝对移动、读回位置")]
struct Args {
    /// 控制器 IP 地址
    #[arg(long, default_value = "192.168.2.100")]
    ip: Ipv4Addr,

    /// TCP 端口
    #[arg(long, default_value = "10001")]
    port: u16,

    /// 目标位置 [mm]
    #[arg(long, default_value = "10.0")]
    target_mm: f64,

    /// 速度百分比 (0, 100]
    #[arg(long, default_value = "50.0")]
    speed: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _ = xenax_sdk::init_logging();

    println!("🔧 XENAX SDK - 基本运动演示");
    println!("==========================\n");

    // ==================== 步骤 1: 连接控制器 ====================
    println!("📡 步骤 1: 连接 {}:{} ...", args.ip, args.port);
    let driver = Arc::new(XenaxAxisDriver::new(args.ip, args.port));
    driver.connect(Duration::from_millis(250))?;
    println!("   ✅ 连接成功\n");

    let controller =
        XenaxAxisController::new("demo-axis", 0, driver.clone(), AxisConfiguration::default());
    let token = CancelToken::new();

    // ==================== 步骤 2: 回零 ====================
    if !controller.is_initialized()? {
        println!("🏠 步骤 2: 回零中...");
        controller.initialize_wait(&token)?;
        println!("   ✅ 回零完成\n");
    } else {
        println!("🏠 步骤 2: 已回零，跳过\n");
    }

    // ==================== 步骤 3: 绝对移动 ====================
    println!(
        "🚀 步骤 3: 移动到 {} mm（速度 {}%）...",
        args.target_mm, args.speed
    );
    controller.move_abs_wait(args.target_mm, args.speed, &token)?;
    println!("   ✅ 运动完成\n");

    // ==================== 步骤 4: 读回位置 ====================
    let position = controller.position()?;
    let status = driver.axis_status(0)?;
    println!("📍 当前位置: {position:.3} mm");
    println!("📋 状态标志: {:?}", status.active_flags());

    driver.disconnect();
    Ok(())
}
