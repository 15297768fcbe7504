#![allow(dead_code)]

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Target as the client sent it in the SOCKS5 CONNECT request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requested {
    Domain(String, u16),
    Ip(SocketAddr),
}

/// What one accepted SOCKS5 session carried
#[derive(Debug, Clone)]
pub struct Session {
    pub username: Option<String>,
    pub password: Option<String>,
    pub target: Requested,
}

/// Accept one SOCKS5 session on a loopback port, record it, and reply success.
pub async fn one_shot_socks5() -> (SocketAddr, JoinHandle<io::Result<Session>>) {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await?;

        let mut greeting = [0u8; 2];
        stream.read_exact(&mut greeting).await?;
        assert_eq!(greeting[0], 0x05, "client must speak SOCKS5");
        let mut methods = vec![0u8; greeting[1] as usize];
        stream.read_exact(&mut methods).await?;

        let (username, password) = if methods.contains(&0x02) {
            stream.write_all(&[0x05, 0x02]).await?;
            let mut header = [0u8; 2];
            stream.read_exact(&mut header).await?;
            let mut username = vec![0u8; header[1] as usize];
            stream.read_exact(&mut username).await?;
            let password_len = stream.read_u8().await?;
            let mut password = vec![0u8; password_len as usize];
            stream.read_exact(&mut password).await?;
            stream.write_all(&[0x01, 0x00]).await?;
            (
                Some(String::from_utf8_lossy(&username).into_owned()),
                Some(String::from_utf8_lossy(&password).into_owned()),
            )
        } else {
            stream.write_all(&[0x05, 0x00]).await?;
            (None, None)
        };

        let mut request = [0u8; 4];
        stream.read_exact(&mut request).await?;
        let target = match request[3] {
            0x01 => {
                let mut ip = [0u8; 4];
                stream.read_exact(&mut ip).await?;
                let port = stream.read_u16().await?;
                Requested::Ip(SocketAddr::from((Ipv4Addr::from(ip), port)))
            }
            0x03 => {
                let len = stream.read_u8().await?;
                let mut name = vec![0u8; len as usize];
                stream.read_exact(&mut name).await?;
                let port = stream.read_u16().await?;
                Requested::Domain(String::from_utf8_lossy(&name).into_owned(), port)
            }
            0x04 => {
                let mut ip = [0u8; 16];
                stream.read_exact(&mut ip).await?;
                let port = stream.read_u16().await?;
                Requested::Ip(SocketAddr::from((Ipv6Addr::from(ip), port)))
            }
            other => panic!("unexpected address type {other}"),
        };

        stream
            .write_all(&[0x05, 0x00, 0x00, 0x01, 127, 0, 0, 1, 0, 0])
            .await?;

        Ok(Session {
            username,
            password,
            target,
        })
    });

    (addr, handle)
}
