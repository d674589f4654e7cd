// ==========================================
// 构建分配引擎 - 命令行入口
// ==========================================
// 用法: build-allocator [--report | --csv] [db_path] <request.json | ->
// 输出: stdout 为响应 JSON（或 CSV 清单），失败时为错误 JSON
// 退出码: 0 成功 / 2 请求不合法 / 1 其他失败
// ==========================================

use std::error::Error;
use std::io::Read;
use std::process::ExitCode;

use build_allocator::api::{ApiError, BuildRequestValidator, ErrorBody};
use build_allocator::app::{get_default_db_path, AppState};
use build_allocator::TransferPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Response,
    Report,
    Csv,
}

struct CliArgs {
    mode: OutputMode,
    db_path: String,
    request_path: String,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut mode = OutputMode::Response;
    let mut positional = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--report" => mode = OutputMode::Report,
            "--csv" => mode = OutputMode::Csv,
            _ => positional.push(arg),
        }
    }

    match positional.len() {
        1 => Ok(CliArgs {
            mode,
            db_path: get_default_db_path(),
            request_path: positional.remove(0),
        }),
        2 => {
            let request_path = positional.remove(1);
            Ok(CliArgs {
                mode,
                db_path: positional.remove(0),
                request_path,
            })
        }
        _ => Err("用法: build-allocator [--report | --csv] [db_path] <request.json | ->".to_string()),
    }
}

fn read_request(path: &str) -> Result<String, Box<dyn Error>> {
    if path == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn print_error(err: &ApiError) -> ExitCode {
    let body = ErrorBody::from(err);
    match serde_json::to_string_pretty(&body) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{}", err),
    }
    if err.is_client_error() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

async fn run(args: CliArgs) -> Result<ExitCode, Box<dyn Error>> {
    let raw = read_request(&args.request_path)?;
    let state = AppState::new(args.db_path)?;
    let api = &state.build_api;

    let body = match BuildRequestValidator::new().parse_json(&raw) {
        Ok(body) => body,
        Err(e) => return Ok(print_error(&e)),
    };

    match args.mode {
        OutputMode::Response => match api.plan_build(body).await {
            Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
            Err(e) => return Ok(print_error(&e)),
        },
        OutputMode::Report => match api.plan_build_with_report(body).await {
            Ok((response, report)) => {
                let json = serde_json::json!({ "response": response, "report": report });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            Err(e) => return Ok(print_error(&e)),
        },
        OutputMode::Csv => match api.plan_build(body).await {
            Ok(response) => {
                let plan = TransferPlan::from(response);
                plan.write_csv(std::io::stdout().lock())?;
            }
            Err(e) => return Ok(print_error(&e)),
        },
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    build_allocator::logging::init();

    tracing::info!("{} v{}", build_allocator::APP_NAME, build_allocator::VERSION);

    let args = match parse_args() {
        Ok(args) => args,
        Err(usage) => {
            eprintln!("{}", usage);
            return ExitCode::from(2);
        }
    };
    tracing::info!("使用数据库: {}", args.db_path);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("执行失败: {}", e);
            ExitCode::FAILURE
        }
    }
}
