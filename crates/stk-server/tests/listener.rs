//! Smoke test over a real socket.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use stk_config::UserEntry;
use stk_core::identity::Role;
use stk_server::{HttpServer, Router, TokenTable};
use stk_store::AssetService;

fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(request.as_bytes()).unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn serves_and_shuts_down() {
    let tokens = Arc::new(TokenTable::new(vec![UserEntry {
        name: "ops".into(),
        token: "secret".into(),
        role: Role::Admin,
    }]));
    let service = Arc::new(AssetService::in_memory());
    let router = Router::new(service, tokens).unwrap();
    let server = HttpServer::bind("127.0.0.1:0", router, 2, 1024 * 1024).unwrap();
    let addr = server.local_addr().unwrap();
    let handle = server.shutdown_handle();

    let (ok, denied) = std::thread::scope(|s| {
        s.spawn(|| server.run());
        let ok = raw_request(
            addr,
            "GET /dashboard-stats HTTP/1.1\r\nHost: localhost\r\nAuthorization: Bearer secret\r\nConnection: close\r\n\r\n",
        );
        let denied = raw_request(
            addr,
            "GET /categories HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        );
        handle.shutdown();
        (ok, denied)
    });

    assert!(ok.starts_with("HTTP/1.1 200"), "{ok}");
    assert!(ok.contains("\"category_count\":0"), "{ok}");
    assert!(denied.starts_with("HTTP/1.1 401"), "{denied}");
}
