// tests/runtime_events.rs

mod common;
use crate::common::{init_tracing, FakeServer};

use std::io::Write as _;

use tokio::time::{timeout, Duration};

use servmux::engine::{event_queue, Event, EventReceiver, ProcedureRegistry, Runtime};

fn runtime_with(server: FakeServer, events_rx: EventReceiver) -> Runtime<FakeServer> {
    Runtime::new(
        server,
        None,
        Vec::new(),
        Vec::new(),
        ProcedureRegistry::with_builtins(),
        events_rx,
    )
}

async fn run_to_completion(runtime: Runtime<FakeServer>) {
    timeout(Duration::from_secs(3), runtime.run())
        .await
        .expect("runtime did not finish within 3 seconds")
        .expect("runtime returned an error");
}

#[tokio::test]
async fn handles_events_in_fifo_order_one_handler_each() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    for i in 0..5 {
        tx.send(Event::Input(format!("say {i}"))).unwrap();
    }
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let writes = state.lock().unwrap().writes.clone();
    let expected: Vec<String> = (0..5).map(|i| format!("say {i}\n")).collect();
    assert_eq!(writes, expected);
}

#[tokio::test]
async fn send_and_angle_bracket_route_to_the_server() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Input("send say hi".to_string())).unwrap();
    tx.send(Event::Input("> say ho".to_string())).unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let writes = state.lock().unwrap().writes.clone();
    assert_eq!(writes, vec!["say hi\n".to_string(), "say ho\n".to_string()]);
}

#[tokio::test]
async fn echo_never_touches_the_server() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Input("echo hello there".to_string())).unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    assert!(state.lock().unwrap().writes.is_empty());
}

#[tokio::test]
async fn start_while_running_is_contained_and_leaves_server_untouched() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Input("start".to_string())).unwrap();
    // The loop must keep dispatching after the contained error.
    tx.send(Event::Input("say after".to_string())).unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let state = state.lock().unwrap();
    assert_eq!(state.start_calls, 0);
    assert_eq!(state.writes, vec!["say after\n".to_string()]);
}

#[tokio::test]
async fn write_on_stopped_server_is_contained_and_touches_no_stream() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(false);
    let state = server.state();

    tx.send(Event::Input("say hi".to_string())).unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let state = state.lock().unwrap();
    assert!(state.writes.is_empty());
    assert_eq!(state.stop_calls, 0);
}

#[tokio::test]
async fn job_fired_pipes_the_prepared_group_text() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::JobFired {
        title: "ping".to_string(),
        text: "say hi\nsay ho\n".to_string(),
    })
    .unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let writes = state.lock().unwrap().writes.clone();
    assert_eq!(writes, vec!["say hi\nsay ho\n".to_string()]);
}

#[tokio::test]
async fn file_changed_loads_exact_file_contents() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("commands.txt");
    let contents = "say one\nsay two\nno trailing newline";
    std::fs::File::create(&path)
        .unwrap()
        .write_all(contents.as_bytes())
        .unwrap();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::FileChanged(path)).unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let writes = state.lock().unwrap().writes.clone();
    assert_eq!(writes, vec![contents.to_string()]);
}

#[tokio::test]
async fn load_directory_pipes_each_file_in_name_order() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.txt"), "from b\n").unwrap();
    std::fs::write(dir.path().join("a.txt"), "from a\n").unwrap();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Input(format!("load {}", dir.path().display())))
        .unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let writes = state.lock().unwrap().writes.clone();
    assert_eq!(writes, vec!["from a\n".to_string(), "from b\n".to_string()]);
}

#[tokio::test]
async fn load_invalid_path_is_contained() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Input("load /definitely/not/here".to_string()))
        .unwrap();
    tx.send(Event::Input("say still alive".to_string())).unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let writes = state.lock().unwrap().writes.clone();
    assert_eq!(writes, vec!["say still alive\n".to_string()]);
}

#[tokio::test]
async fn run_resolves_registered_procedures() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Input("run countdown 2".to_string())).unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let writes = state.lock().unwrap().writes.clone();
    assert_eq!(writes, vec!["say 2\n".to_string(), "say 1\n".to_string()]);
}

#[tokio::test]
async fn run_unknown_procedure_is_contained() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Input("run warp home".to_string())).unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    assert!(state.lock().unwrap().writes.is_empty());
}

#[tokio::test]
async fn unrecognised_input_is_forwarded_verbatim() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Input("whitelist add steve".to_string()))
        .unwrap();
    tx.send(Event::Exit).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    let writes = state.lock().unwrap().writes.clone();
    assert_eq!(writes, vec!["whitelist add steve\n".to_string()]);
}

#[tokio::test]
async fn events_enqueued_after_exit_are_never_handled() {
    init_tracing();

    let (tx, rx) = event_queue();
    let server = FakeServer::new(true);
    let state = server.state();

    tx.send(Event::Exit).unwrap();
    tx.send(Event::Input("say too late".to_string())).unwrap();

    run_to_completion(runtime_with(server, rx)).await;

    assert!(state.lock().unwrap().writes.is_empty());
}
