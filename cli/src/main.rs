mod highlighter;
mod lexer;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use reckon::{
    DynamicFunction, Engine, EngineOptions, FunctionError, FunctionRegistry, NativeFunction,
    RegistrationError, Value, render_error,
};
use reckon::stdlib::register_conv;
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::io::BufRead;
use std::io::BufReader;
use std::sync::Arc;

/// Reckon - evaluate arithmetic expressions with registered functions
#[derive(Parser, Debug)]
#[command(name = "reckon")]
#[command(about = "Evaluate Reckon expressions", long_about = None)]
struct Args {
    /// Print the parsed expression tree (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Run the built-in sample expressions and exit
    #[arg(long)]
    demo: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

const DEMO_EXPRESSIONS: &[&str] = &[
    "1 + 2 * 3",
    "(1 + 2) * 3",
    "10 / 2 + 5",
    "-5 + 3",
    "3.14 * 2",
    "sin(0)",
    "cos(0)",
    "log(2)",
    "exp(2)",
    "x + 2",
    "add(5, 3)",
    "add(5.5, 3.3)",
    "add(int(5), 3)",
];

/// `add(a, b)` over two ints or two floats.
fn add() -> DynamicFunction {
    DynamicFunction::single(2, |args| match (args[0], args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (a, b) => Err(FunctionError::type_mismatch(format!(
            "cannot add {} and {}",
            a.kind(),
            b.kind()
        ))),
    })
}

fn register_demo(registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
    registry.register("sin", NativeFunction::unary(f64::sin))?;
    registry.register("cos", NativeFunction::unary(f64::cos))?;

    // Only `int` from the conversion package
    let mut conv = FunctionRegistry::new();
    register_conv(&mut conv)?;
    if let Some(int) = conv.lookup("int") {
        registry.register_arc("int", Arc::clone(int))?;
    }

    registry.register("add", add())
}

fn run_demo() -> Result<()> {
    let engine = Engine::new(EngineOptions::default(), register_demo).into_diagnostic()?;
    for source in DEMO_EXPRESSIONS {
        match engine.eval(source) {
            Ok(value) => println!("{} = {}", source, value),
            Err(e) => println!("{} error: {}", source, e),
        }
    }
    Ok(())
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline(engine: &Engine) -> (Reedline, DefaultPrompt) {
    // Complete on registered function names
    let names: Vec<String> = engine
        .registry()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['.', '_']);
        completions.insert(names);
        completions
    });

    let completion_menu = Box::new(
        IdeMenu::default()
            .with_name("completion_menu")
            .with_description_mode(DescriptionMode::PreferRight),
    );

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(highlighter::Highlighter))
        .with_validator(Box::new(highlighter::ParenValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let prompt = DefaultPrompt::new(DefaultPromptSegment::Empty, DefaultPromptSegment::Empty);

    (line_editor, prompt)
}

fn interpret_input(engine: &Engine, input: &str, debug_parse: bool) {
    if input.trim().is_empty() {
        return;
    }

    let compiled = match engine.compile(input) {
        Ok(compiled) => compiled,
        Err(e) => {
            render_error(&e);
            return;
        }
    };

    if debug_parse {
        println!("=== Parsed Expression ===");
        println!("{}", compiled.expr());
        println!("nodes: {}", compiled.expr().size());
        println!();
    }

    match compiled.run(Default::default()) {
        Ok(value) => println!("{} = {}", input.trim(), value),
        Err(e) => render_error(&e),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RECKON_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("RECKON_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if args.demo {
        return run_demo();
    }

    let engine = Engine::with_stdlib(EngineOptions::default(), |registry| {
        registry.register("add", add())
    })
    .into_diagnostic()?;
    tracing::debug!(functions = engine.registry().len(), "engine ready");

    // Check if we have a direct expression argument
    if let Some(expr) = args.expression {
        interpret_input(&engine, &expr, args.debug_parse);
        return Ok(());
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        // Interactive REPL mode
        let (mut line_editor, prompt) = setup_reedline(&engine);

        println!("Reckon REPL - Type expressions to evaluate (Ctrl+D or Ctrl+C to exit)");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => {
                    interpret_input(&engine, buffer.as_ref(), args.debug_parse);
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading line from stdin: {}", e);
                    return Ok(());
                }
            };

            interpret_input(&engine, &line, args.debug_parse);
        }
    }

    Ok(())
}
