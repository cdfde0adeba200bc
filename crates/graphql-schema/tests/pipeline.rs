use graphql_schema::{introspect_schema, IntrospectOptions, SchemaError};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use rcgen::CertifiedKey;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::rustls::crypto::aws_lc_rs;
use tokio_rustls::rustls::pki_types::PrivatePkcs8KeyDer;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

const REMOTE_SDL: &str = r#"
type Query {
  me: User
}

"A signed-in user"
type User {
  id: ID!
  name: String
}
"#;

const REMOTE_RESPONSE: &str = r#"{"data": {"__schema": {
    "queryType": {"name": "Query"},
    "mutationType": null,
    "subscriptionType": null,
    "types": [
        {"kind": "OBJECT", "name": "Query", "description": null,
         "fields": [{"name": "me", "description": null, "args": [],
                     "type": {"kind": "OBJECT", "name": "User", "ofType": null},
                     "isDeprecated": false, "deprecationReason": null}],
         "inputFields": null, "interfaces": [], "enumValues": null, "possibleTypes": null},
        {"kind": "OBJECT", "name": "User", "description": "A signed-in user",
         "fields": [{"name": "id", "description": null, "args": [],
                     "type": {"kind": "NON_NULL", "name": null,
                              "ofType": {"kind": "SCALAR", "name": "ID", "ofType": null}},
                     "isDeprecated": false, "deprecationReason": null},
                    {"name": "name", "description": null, "args": [],
                     "type": {"kind": "SCALAR", "name": "String", "ofType": null},
                     "isDeprecated": false, "deprecationReason": null}],
         "inputFields": null, "interfaces": [], "enumValues": null, "possibleTypes": null},
        {"kind": "SCALAR", "name": "String", "description": null, "fields": null,
         "inputFields": null, "interfaces": null, "enumValues": null, "possibleTypes": null}
    ],
    "directives": []
}}}"#;

/// A project with client-side schema files under `stores/` and a remote
/// schema file next to them.
fn project() -> TempDir {
    let dir = tempdir().unwrap();
    let stores = dir.path().join("stores");
    fs::create_dir_all(&stores).unwrap();
    fs::write(
        stores.join("cart.graphql"),
        "type CartItem { id: ID!, quantity: Int! }\n\nextend type Query { cartItems: [CartItem!]! }\n",
    )
    .unwrap();
    fs::write(
        stores.join("session.graphql"),
        "enum Theme { LIGHT DARK }\n\nextend type Query { theme: Theme! }\n",
    )
    .unwrap();
    fs::write(dir.path().join("remote.graphql"), REMOTE_SDL).unwrap();
    dir
}

fn options(dir: &Path, remote: impl Into<String>) -> IntrospectOptions {
    IntrospectOptions::new(remote).with_base_dir(dir)
}

fn file_options(dir: &TempDir) -> IntrospectOptions {
    let remote = dir.path().join("remote.graphql");
    options(dir.path(), remote.display().to_string())
}

fn type_names(json: &str) -> Vec<String> {
    let value: Value = serde_json::from_str(json).unwrap();
    value["__schema"]["types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ty| ty["name"].as_str().unwrap().to_string())
        .collect()
}

fn field_names(json: &str, type_name: &str) -> Vec<String> {
    let value: Value = serde_json::from_str(json).unwrap();
    let ty = value["__schema"]["types"]
        .as_array()
        .unwrap()
        .iter()
        .find(|ty| ty["name"] == type_name)
        .unwrap_or_else(|| panic!("type {type_name} missing"))
        .clone();
    ty["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|field| field["name"].as_str().unwrap().to_string())
        .collect()
}

/// Reads one HTTP request from `stream`, answers it with `body` and hangs up.
async fn answer<S>(mut stream: S, body: &str)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        let mut tmp = [0u8; 4096];
        let n = stream.read(&mut tmp).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&tmp[..n]);
        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length: "))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= header_end + 4 + content_length {
            break;
        }
    }

    let resp = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    stream.write_all(resp.as_bytes()).await.unwrap();
    stream.shutdown().await.ok();
}

/// Answers one plain HTTP request with `body`.
async fn serve_one(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        answer(stream, body).await;
    });

    format!("http://{addr}/graphql")
}

/// Answers one HTTPS request with `body`, presenting a freshly generated
/// self-signed certificate that no client trusts.
async fn serve_one_self_signed(body: &'static str) -> String {
    let CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string(), "127.0.0.1".to_string()])
            .unwrap();
    let key = PrivatePkcs8KeyDer::from(key_pair.serialize_der());
    let config = ServerConfig::builder_with_provider(Arc::new(aws_lc_rs::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![cert.der().clone()], key.into())
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        // A client that verifies certificates aborts the handshake.
        if let Ok(stream) = acceptor.accept(stream).await {
            answer(stream, body).await;
        }
    });

    format!("https://{addr}/graphql")
}

#[tokio::test]
async fn every_type_appears_exactly_once() {
    let dir = project();
    let json = introspect_schema(&file_options(&dir))
        .await
        .unwrap();

    let names = type_names(&json);
    for expected in ["Query", "User", "CartItem", "Theme", "String", "ID"] {
        assert_eq!(
            names.iter().filter(|name| *name == expected).count(),
            1,
            "{expected} in {names:?}"
        );
    }
}

#[tokio::test]
async fn client_extensions_are_introspected() {
    let dir = project();
    let json = introspect_schema(&file_options(&dir))
        .await
        .unwrap();

    let mut fields = field_names(&json, "Query");
    fields.sort();
    assert_eq!(fields, vec!["cartItems", "me", "theme"]);
}

#[tokio::test]
async fn remote_definition_overrides_local_one() {
    let dir = project();
    fs::write(
        dir.path().join("stores").join("user.graphql"),
        "type User { id: ID!, nickname: String }\n",
    )
    .unwrap();

    let json = introspect_schema(&file_options(&dir))
        .await
        .unwrap();

    assert_eq!(field_names(&json, "User"), vec!["id", "name"]);
}

#[tokio::test]
async fn repeated_runs_are_byte_identical() {
    let dir = project();
    let first_output = dir.path().join("first.json");
    let second_output = dir.path().join("second.json");

    let first = introspect_schema(&file_options(&dir).with_output(&first_output))
        .await
        .unwrap();
    let second = introspect_schema(&file_options(&dir).with_output(&second_output))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read(&first_output).unwrap(), fs::read(&second_output).unwrap());
    assert_eq!(fs::read_to_string(&first_output).unwrap(), first);
}

#[tokio::test]
async fn stored_introspection_json_is_a_remote_source() {
    let dir = project();
    let remote = dir.path().join("remote.json");
    fs::write(&remote, REMOTE_RESPONSE).unwrap();

    let json = introspect_schema(&options(dir.path(), remote.display().to_string()))
        .await
        .unwrap();

    assert!(type_names(&json).contains(&"User".to_string()));
    let mut fields = field_names(&json, "Query");
    fields.sort();
    assert_eq!(fields, vec!["cartItems", "me", "theme"]);
}

#[tokio::test]
async fn url_remote_writes_output() {
    let dir = project();
    let output = dir.path().join("schema.json");
    let url = serve_one(REMOTE_RESPONSE).await;

    let json = introspect_schema(&options(dir.path(), url).with_output(&output))
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), json);
    assert!(type_names(&json).contains(&"CartItem".to_string()));
}

#[tokio::test]
async fn remote_errors_fail_without_writing() {
    let dir = project();
    let output = dir.path().join("schema.json");
    let url = serve_one(r#"{"errors": [{"message": "Introspection is disabled"}]}"#).await;

    let err = introspect_schema(&options(dir.path(), url).with_output(&output))
        .await
        .unwrap_err();

    assert!(matches!(err, SchemaError::RemoteSchema(ref msg) if msg.contains("Introspection is disabled")));
    assert!(!output.exists());
}

#[tokio::test]
async fn empty_glob_fails_before_contacting_remote() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("schema.json");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/graphql", listener.local_addr().unwrap());

    let err = introspect_schema(&options(dir.path(), url).with_output(&output))
        .await
        .unwrap_err();

    assert!(matches!(err, SchemaError::Load(_)));
    assert!(!output.exists());
    let contacted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(contacted.is_err(), "remote was contacted");
}

#[tokio::test]
async fn invalid_merged_schema_is_build_error() {
    let dir = project();
    fs::write(
        dir.path().join("stores").join("broken.graphql"),
        "extend type Query { wishlist: Wishlist }\n",
    )
    .unwrap();

    let err = introspect_schema(&file_options(&dir))
        .await
        .unwrap_err();

    assert!(matches!(err, SchemaError::SchemaBuild(ref msg) if msg.contains("Wishlist")));
}

#[tokio::test]
async fn secure_remote_hang_up_is_remote_schema_error() {
    let dir = project();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("https://{}/graphql", listener.local_addr().unwrap());
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        drop(stream);
    });

    let err = introspect_schema(&options(dir.path(), url).with_insecure(false))
        .await
        .unwrap_err();

    assert!(matches!(err, SchemaError::RemoteSchema(_)));
}

#[tokio::test]
async fn insecure_fetch_accepts_self_signed_certificate() {
    let dir = project();
    let output = dir.path().join("schema.json");
    let url = serve_one_self_signed(REMOTE_RESPONSE).await;

    let json = introspect_schema(&options(dir.path(), url).with_insecure(true).with_output(&output))
        .await
        .unwrap();

    assert!(type_names(&json).contains(&"User".to_string()));
    assert_eq!(fs::read_to_string(&output).unwrap(), json);
}

#[tokio::test]
async fn verified_fetch_rejects_self_signed_certificate() {
    let dir = project();
    let output = dir.path().join("schema.json");
    let url = serve_one_self_signed(REMOTE_RESPONSE).await;

    let err = introspect_schema(&options(dir.path(), url).with_insecure(false).with_output(&output))
        .await
        .unwrap_err();

    assert!(
        matches!(err, SchemaError::RemoteSchema(ref msg) if msg.contains("certificate")),
        "{err}"
    );
    assert!(!output.exists());
}

#[tokio::test]
async fn control_characters_in_remote_descriptions_survive() {
    let dir = project();
    let remote = dir.path().join("remote.json");
    fs::write(
        &remote,
        REMOTE_RESPONSE.replace("A signed-in user", "line one\\rline two\\u0007"),
    )
    .unwrap();

    let json = introspect_schema(&options(dir.path(), remote.display().to_string()))
        .await
        .unwrap();

    let value: Value = serde_json::from_str(&json).unwrap();
    let user = value["__schema"]["types"]
        .as_array()
        .unwrap()
        .iter()
        .find(|ty| ty["name"] == "User")
        .unwrap();
    assert_eq!(user["description"], "line one\rline two\u{7}");
}
