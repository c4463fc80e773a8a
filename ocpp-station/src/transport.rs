use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use base64::{engine::general_purpose, Engine as _};
use futures::{SinkExt, StreamExt};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async_tls_with_config,
    tungstenite::{
        client::IntoClientRequest,
        http::{header, HeaderValue},
        protocol::{frame::coding::CloseCode, CloseFrame},
        Message,
    },
    Connector, MaybeTlsStream, WebSocketStream,
};

use crate::error::TransportError;

pub const OCPP_201: &str = "ocpp2.0.1";

/// Some CSMS implementations drop frames sent right after the upgrade.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

#[async_trait::async_trait]
pub trait WebsocketIo: Send + Unpin + 'static {
    /// `Ready(None)` once the peer has closed the connection.
    fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<String>>;
    async fn send(&mut self, msg: String) -> Result<(), TransportError>;
    async fn close(&mut self, code: u16, reason: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Auth {
    Basic { username: String, password: String },
}

impl Auth {
    fn header_value(&self) -> Result<HeaderValue, TransportError> {
        match self {
            Auth::Basic { username, password } => {
                let token = general_purpose::STANDARD.encode(format!("{username}:{password}"));
                HeaderValue::from_str(&format!("Basic {token}"))
                    .map_err(|e| TransportError::InvalidUrl(format!("authorization header: {e}")))
            }
        }
    }
}

/// Trust anchors and optional client certificate for security profile 2/3.
#[derive(Clone, Debug, PartialEq)]
pub struct TlsOptions {
    pub ca_cert: PathBuf,
    pub client_cert: Option<PathBuf>,
    pub client_key: Option<PathBuf>,
}

impl TlsOptions {
    pub fn client_config(&self) -> Result<rustls::ClientConfig, TransportError> {
        let mut roots = rustls::RootCertStore::empty();
        for cert in load_certs(&self.ca_cert)? {
            roots
                .add(cert)
                .map_err(|e| TransportError::Tls(format!("{}: {e}", self.ca_cert.display())))?;
        }
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let builder = rustls::ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| TransportError::Tls(e.to_string()))?
            .with_root_certificates(roots);
        match (&self.client_cert, &self.client_key) {
            (Some(cert), Some(key)) => builder
                .with_client_auth_cert(load_certs(cert)?, load_key(key)?)
                .map_err(|e| TransportError::Tls(e.to_string())),
            _ => Ok(builder.with_no_client_auth()),
        }
    }
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TransportError> {
    let file = File::open(path).map_err(|e| TransportError::Tls(format!("{}: {e}", path.display())))?;
    rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| TransportError::Tls(format!("{}: {e}", path.display())))
}

fn load_key(path: &Path) -> Result<PrivateKeyDer<'static>, TransportError> {
    let file = File::open(path).map_err(|e| TransportError::Tls(format!("{}: {e}", path.display())))?;
    rustls_pemfile::private_key(&mut BufReader::new(file))
        .map_err(|e| TransportError::Tls(format!("{}: {e}", path.display())))?
        .ok_or_else(|| TransportError::Tls(format!("{}: no private key found", path.display())))
}

#[derive(Clone, Debug)]
pub struct ConnectOptions {
    /// CSMS base address; the identity is appended as the last path segment.
    pub url: String,
    pub identity: String,
    pub subprotocols: Vec<String>,
    pub auth: Option<Auth>,
    pub tls: Option<TlsOptions>,
    pub settle: Duration,
}

impl ConnectOptions {
    pub fn new(url: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            identity: identity.into(),
            subprotocols: vec![OCPP_201.to_string()],
            auth: None,
            tls: None,
            settle: DEFAULT_SETTLE,
        }
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Auth::Basic {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn subprotocols<I, S>(mut self, subprotocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subprotocols = subprotocols.into_iter().map(Into::into).collect();
        self
    }

    pub fn tls(mut self, tls: TlsOptions) -> Self {
        self.tls = Some(tls);
        self
    }

    pub fn settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn endpoint_url(&self) -> Result<url::Url, TransportError> {
        let mut url = url::Url::parse(&self.url).map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", self.url)))?;
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.url.clone()))?
            .pop_if_empty()
            .push(&self.identity);
        Ok(url)
    }
}

/// Outcome of a successful upgrade.
#[derive(Clone, Debug, PartialEq)]
pub struct Handshake {
    pub status: u16,
    pub subprotocol: Option<String>,
}

pub async fn connect(options: &ConnectOptions) -> Result<(TokioWsClient, Handshake), TransportError> {
    let url = options.endpoint_url()?;
    let mut req = url
        .as_str()
        .into_client_request()
        .map_err(TransportError::from_handshake)?;
    let headers = req.headers_mut();
    if !options.subprotocols.is_empty() {
        let offered = HeaderValue::from_str(&options.subprotocols.join(", "))
            .map_err(|e| TransportError::InvalidUrl(format!("subprotocols: {e}")))?;
        headers.insert(header::SEC_WEBSOCKET_PROTOCOL, offered);
    }
    if let Some(auth) = &options.auth {
        headers.insert(header::AUTHORIZATION, auth.header_value()?);
    }
    let connector = match &options.tls {
        Some(tls) => Some(Connector::Rustls(Arc::new(tls.client_config()?))),
        None => None,
    };

    log::debug!("connecting to {} offering {:?}", url, options.subprotocols);
    let (socket, response) = connect_async_tls_with_config(req, None, false, connector)
        .await
        .map_err(TransportError::from_handshake)?;
    let handshake = Handshake {
        status: response.status().as_u16(),
        subprotocol: response
            .headers()
            .get(header::SEC_WEBSOCKET_PROTOCOL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    log::info!(
        "connected as {} (status {}, subprotocol {:?})",
        options.identity,
        handshake.status,
        handshake.subprotocol
    );

    if !options.settle.is_zero() {
        tokio::time::sleep(options.settle).await;
    }
    Ok((TokioWsClient::new(socket), handshake))
}

pub struct TokioWsClient {
    socket: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl TokioWsClient {
    pub fn new(socket: WebSocketStream<MaybeTlsStream<TcpStream>>) -> Self {
        Self { socket: Some(socket) }
    }
}

#[async_trait::async_trait]
impl WebsocketIo for TokioWsClient {
    fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<String>> {
        let socket = match self.socket.as_mut() {
            Some(sock) => sock,
            None => return Poll::Ready(None),
        };
        loop {
            match socket.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(Message::Text(s)))) => return Poll::Ready(Some(s.as_str().to_owned())),
                Poll::Ready(Some(Ok(Message::Close(frame)))) => {
                    log::info!("close frame from CSMS: {:?}", frame);
                    self.socket = None;
                    return Poll::Ready(None);
                }
                // Pings are answered by tungstenite on the next read or write.
                Poll::Ready(Some(Ok(other))) => {
                    log::debug!("ignoring non-text frame: {:?}", other);
                    continue;
                }
                Poll::Ready(Some(Err(e))) => {
                    log::error!("ws error: {:?}", e);
                    self.socket = None;
                    return Poll::Ready(None);
                }
                Poll::Ready(None) => {
                    self.socket = None;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }

    async fn send(&mut self, msg: String) -> Result<(), TransportError> {
        match &mut self.socket {
            Some(socket) => socket
                .send(Message::Text(msg.into()))
                .await
                .map_err(|e| TransportError::Send(Box::new(e))),
            None => Err(TransportError::Send(Box::new(
                tokio_tungstenite::tungstenite::Error::AlreadyClosed,
            ))),
        }
    }

    async fn close(&mut self, code: u16, reason: &str) {
        if let Some(mut socket) = self.socket.take() {
            let frame = CloseFrame {
                code: CloseCode::from(code),
                reason: reason.to_string().into(),
            };
            if let Err(e) = socket.close(Some(frame)).await {
                log::debug!("close: {:?}", e);
            }
        }
    }
}
