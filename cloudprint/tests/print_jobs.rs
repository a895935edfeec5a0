use cloudprint::{ErrorKind, PrintJob, PrintJobStatus};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::create_test_client;

#[tokio::test]
async fn test_all_jobs() {
    let (client, http) = create_test_client();
    http.push_json(
        200,
        json!({
            "success": true,
            "jobs": [
                {"id": "job-1", "status": "DONE"},
                {"id": "job-2", "status": "ERROR", "errorCode": "PAPER_JAM"},
                {"id": "job-3", "status": "HELD", "error_code": ""}
            ]
        }),
    );

    let jobs = client.print_jobs().all().await.unwrap();
    assert_eq!(
        jobs,
        vec![
            PrintJob::new("job-1", "DONE", None),
            PrintJob::new("job-2", "ERROR", Some("PAPER_JAM".to_string())),
            PrintJob::new("job-3", PrintJobStatus::Other("HELD".to_string()), None),
        ]
    );

    let req = http.last_request();
    assert_eq!(req.method, http::Method::GET);
    assert_eq!(req.uri, "https://www.google.com/cloudprint/jobs");
}

#[tokio::test]
async fn test_all_jobs_empty() {
    let (client, http) = create_test_client();
    http.push_json(200, json!({"success": true, "jobs": []}))
        .push_json(200, json!({"success": true}))
        .push_body(200, "");

    assert!(client.print_jobs().all().await.unwrap().is_empty());
    assert!(client.print_jobs().all().await.unwrap().is_empty());
    assert!(client.print_jobs().all().await.unwrap().is_empty());
    assert_eq!(http.token_exchange_count(), 1);
}

#[tokio::test]
async fn test_find_job() {
    let (client, http) = create_test_client();
    http.push_json(
        200,
        json!({"jobs": [{"id": "job-1", "status": "QUEUED"}, {"id": "job-2", "status": "IN_PROGRESS"}]}),
    )
    .push_json(200, json!({"jobs": [{"id": "job-1", "status": "QUEUED"}]}));

    let job = client.print_jobs().find("job-2").await.unwrap().unwrap();
    assert!(job.is_in_progress());
    assert_eq!(job.id(), "job-2");

    assert_eq!(client.print_jobs().find("job-42").await.unwrap(), None);
}

#[tokio::test]
async fn test_refresh_job() {
    let (client, http) = create_test_client();
    let listing = json!({"jobs": [{"id": "job-1", "status": "ERROR", "error_code": "OUT_OF_PAPER"}]});
    http.push_json(200, listing.clone())
        .push_json(200, listing);

    let mut job = PrintJob::new("job-1", "QUEUED", None);
    job.refresh(client.print_jobs()).await.unwrap();
    assert!(job.is_error());
    assert_eq!(job.error_code(), Some("OUT_OF_PAPER"));

    let first = job.clone();
    job.refresh(client.print_jobs()).await.unwrap();
    assert_eq!(job, first);
}

#[tokio::test]
async fn test_refresh_clears_error_code() {
    let (client, http) = create_test_client();
    http.push_json(200, json!({"jobs": [{"id": "job-1", "status": "DONE"}]}));

    let mut job = PrintJob::new("job-1", "ERROR", Some("PAPER_JAM".to_string()));
    let refreshed = client.print_jobs().refresh(&mut job).await.unwrap();
    assert!(refreshed.is_done());
    assert_eq!(refreshed.error_code(), None);
}

#[tokio::test]
async fn test_refresh_missing_job() {
    let (client, http) = create_test_client();
    http.push_json(200, json!({"jobs": [{"id": "job-2", "status": "DONE"}]}));

    let mut job = PrintJob::new("job-1", "QUEUED", None);
    let err = job.refresh(client.print_jobs()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    // The local state is left as it was.
    assert!(job.is_queued());
}

#[tokio::test]
async fn test_delete_job() {
    let (client, http) = create_test_client();
    http.push_json(
        200,
        json!({"success": true, "message": "Print job deleted successfully."}),
    );

    let job = PrintJob::new("job 1", "DONE", None);
    job.delete(client.print_jobs()).await.unwrap();

    let req = http.last_request();
    assert_eq!(
        req.uri,
        "https://www.google.com/cloudprint/deletejob?jobid=job+1"
    );
}

#[tokio::test]
async fn test_delete_unknown_job() {
    let (client, http) = create_test_client();
    http.push_json(200, json!({"success": false, "message": "Job not found."}));

    let err = client.print_jobs().delete("job-42").await.unwrap_err();
    assert!(err.is_connection());
    assert!(err.message().ends_with("Job not found."));
}
