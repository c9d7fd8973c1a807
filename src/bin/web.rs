//! 업로드 웹 서버
//!
//! 브라우저에서 리포트를 업로드하면 변환된 워크북을 즉시 내려준다.
//! `--features web`로 빌드한다.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tempfile::TempDir;
use tracing::{error, info};

use adsheet::{version, Converter, ConverterBuilder, ConvertError};

const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="ko">
<head>
  <meta charset="utf-8">
  <title>광고 리포트 변환기</title>
</head>
<body>
  <h1>광고 리포트 변환기</h1>
  <p>광고 플랫폼에서 내보낸 리포트(.xlsx / .xls)를 올리면
     서식과 색상이 적용된 워크북을 내려받습니다.</p>
  <form action="/upload" method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept=".xlsx,.xls" required>
    <button type="submit">변환</button>
  </form>
</body>
</html>
"#;

#[derive(Clone)]
struct AppState {
    converter: Arc<Converter>,
    /// 버전 번호 연속성을 위한 변환 결과 보관 디렉토리 (프로세스 종료 시 삭제)
    output_dir: Arc<TempDir>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let state = AppState {
        converter: Arc::new(
            ConverterBuilder::new()
                .with_max_input_file_size(MAX_UPLOAD_BYTES as u64)
                .build()?,
        ),
        output_dir: Arc::new(tempfile::tempdir()?),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
    info!("0.0.0.0:5000 에서 대기 중");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    // "file" 필드를 찾는다
    let mut upload: Option<(String, Vec<u8>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((file_name, bytes.to_vec()));
                        break;
                    }
                    Err(e) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("업로드 본문을 읽을 수 없습니다: {e}"),
                        );
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("잘못된 multipart 요청: {e}"),
                );
            }
        }
    }

    let Some((file_name, bytes)) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "file 필드가 없습니다");
    };
    if file_name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "파일이 선택되지 않았습니다");
    }

    let lower = file_name.to_lowercase();
    if !lower.ends_with(".xlsx") && !lower.ends_with(".xls") {
        return error_response(
            StatusCode::BAD_REQUEST,
            "엑셀 파일(.xlsx, .xls)만 업로드할 수 있습니다",
        );
    }

    // 변환은 CPU 작업이므로 블로킹 풀에서 수행
    let converter = Arc::clone(&state.converter);
    let converted = tokio::task::spawn_blocking(move || {
        converter.convert_to_buffer(std::io::Cursor::new(bytes))
    })
    .await;

    let (report, output_bytes) = match converted {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            info!(file = %file_name, error = %e, "변환 실패");
            let status = match e {
                ConvertError::Schema { .. } | ConvertError::Parse(_) | ConvertError::Limit(_) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            return error_response(status, e.to_string());
        }
        Err(e) => {
            error!(error = %e, "변환 태스크 실패");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "내부 오류");
        }
    };

    // 같은 보고 기간의 재업로드는 버전 번호가 올라가도록 결과를 보관한다
    let output_name = match &report.base_name {
        Some(base) => {
            let tag = version::next_version(state.output_dir.path(), base);
            format!("{base}_{tag}.xlsx")
        }
        None => "converted.xlsx".to_string(),
    };
    if let Err(e) =
        tokio::fs::write(state.output_dir.path().join(&output_name), &output_bytes).await
    {
        error!(error = %e, "변환 결과 보관 실패");
    }

    info!(
        file = %file_name,
        output = %output_name,
        rows_total = report.rows_total,
        rows_kept = report.rows_kept,
        diagnostics = report.diagnostics.len(),
        "변환 완료"
    );

    (
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{output_name}\""),
            ),
        ],
        output_bytes,
    )
        .into_response()
}
