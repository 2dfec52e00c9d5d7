use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use post_feed::config::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use post_feed::input::InputCommand;
use post_feed::render::render_page;
use post_feed::{
    FeedConfig, FilePostSource, HttpPostSource, PageController, PostSource, QueryStore,
    UrlQueryStore,
};
use post_filter::SEARCH_DEBOUNCE;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// 主函数
#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = run(&matches).await {
        error!(error = %e, "运行失败");
        eprintln!("错误: {}", e);
        std::process::exit(1);
    }
}

// 设置命令行参数
fn build_cli() -> Command {
    Command::new("帖子筛选器")
        .version(env!("CARGO_PKG_VERSION"))
        .about("获取帖子，按标题搜索并按标签筛选")
        .arg(Arg::new("endpoint")
            .short('e')
            .long("endpoint")
            .value_name("URL")
            .help("帖子接口地址")
            .default_value(DEFAULT_ENDPOINT))
        .arg(Arg::new("file")
            .long("file")
            .value_name("PATH")
            .help("从本地 JSON 文件读取帖子，代替网络请求")
            .conflicts_with("endpoint"))
        .arg(Arg::new("query")
            .short('q')
            .long("query")
            .value_name("QUERY")
            .help("页面地址或查询字符串，例如 'search=love&filters=history'")
            .default_value(""))
        .arg(Arg::new("search")
            .short('s')
            .long("search")
            .value_name("TERM")
            .help("搜索词，覆盖查询字符串中的 search"))
        .arg(Arg::new("filter")
            .short('f')
            .long("filter")
            .value_name("TAG")
            .help("启用的标签，可重复，覆盖查询字符串中的 filters")
            .action(ArgAction::Append))
        .arg(Arg::new("debounce_ms")
            .long("debounce-ms")
            .value_name("MILLIS")
            .help("搜索输入的静默窗口")
            .value_parser(value_parser!(u64))
            .default_value("500"))
        .arg(Arg::new("timeout_secs")
            .long("timeout-secs")
            .value_name("SECS")
            .help("请求超时")
            .value_parser(value_parser!(u64))
            .default_value("30"))
        .arg(Arg::new("interactive")
            .short('i')
            .long("interactive")
            .help("交互模式：逐行输入搜索词，或 ':tag NAME on|off'、':clear'、':quit'")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细日志")
            .action(ArgAction::SetTrue))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(matches: &ArgMatches) -> post_feed::Result<()> {
    // 获取参数值
    let endpoint = matches
        .get_one::<String>("endpoint")
        .map(String::as_str)
        .unwrap_or(DEFAULT_ENDPOINT);
    let debounce_ms = matches
        .get_one::<u64>("debounce_ms")
        .copied()
        .unwrap_or(SEARCH_DEBOUNCE.as_millis() as u64);
    let timeout_secs = matches
        .get_one::<u64>("timeout_secs")
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT.as_secs());
    let config = FeedConfig::new(endpoint, debounce_ms, timeout_secs)?;

    let raw_query = matches.get_one::<String>("query").map(String::as_str).unwrap_or_default();
    let mut store = UrlQueryStore::parse(raw_query)?;

    // 命令行参数覆盖查询字符串
    let search = matches.get_one::<String>("search");
    let filters: Option<Vec<String>> = matches
        .get_many::<String>("filter")
        .map(|values| values.cloned().collect());
    if search.is_some() || filters.is_some() {
        let mut params = store.read();
        if let Some(search) = search {
            params.search = Some(search.clone());
        }
        if let Some(filters) = filters {
            params.filters = filters;
        }
        store.write(&params);
    }

    let source: Arc<dyn PostSource> = match matches.get_one::<String>("file") {
        Some(path) => Arc::new(FilePostSource::new(path)),
        None => Arc::new(HttpPostSource::new(&config)?),
    };

    let mut controller = PageController::new(store, config.debounce);
    controller.load(source);

    if matches.get_flag("interactive") {
        run_interactive(&mut controller).await
    } else {
        let loaded = controller.wait_loaded().await;
        print!("{}", render_page(controller.state()));
        loaded?;
        println!("query: ?{}", controller.query().query_string());
        Ok(())
    }
}

// 交互模式：读取标准输入，同时处理请求和防抖事件
async fn run_interactive(controller: &mut PageController<UrlQueryStore>) -> post_feed::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("进入交互模式");
    repaint(controller);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match InputCommand::parse(&line) {
                    InputCommand::Search(raw) => {
                        controller.input(&raw);
                        println!("> {}", controller.state().search_input());
                    }
                    InputCommand::Tag { name, enabled } => {
                        if controller.toggle_tag(&name, enabled) {
                            repaint(controller);
                        } else {
                            warn!(tag = %name, "未知标签");
                            println!("未知标签: {}", name);
                        }
                    }
                    InputCommand::Clear => {
                        controller.clear_all();
                        repaint(controller);
                    }
                    InputCommand::Quit => break,
                    InputCommand::Unknown(line) => println!("无法识别的命令: {}", line),
                }
            }
            Some(event) = controller.next_event() => {
                if controller.handle(event) {
                    repaint(controller);
                }
            }
        }
    }

    Ok(())
}

fn repaint(controller: &PageController<UrlQueryStore>) {
    print!("{}", render_page(controller.state()));
    println!("query: ?{}", controller.query().query_string());
}
