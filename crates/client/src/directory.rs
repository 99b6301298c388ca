//! reqwest-backed directory client

use medstaff_api::endpoints::{self, WorkerFilter};
use medstaff_api::{
    ApiError, ApiMessage, Department, DepartmentDeleted, FacilityType, IMAGE_FIELD,
    MedicalWorker, NewMedicalWorker, Specialization, WorkerCreated, WorkerUpdate,
    edited_image_filename, report_filename,
};
use medstaff_config::ApiConfig;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{ClientError, ImageStore, WorkerStore};

/// A downloaded report file
#[derive(Debug, Clone)]
pub struct Report {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Client for one directory server
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoints::join(&self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} -> {}", response.url().path(), status);
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!("Could not read error body: {}", err);
                String::new()
            }
        };
        Err(ApiError::from_response(status.as_u16(), &body).into())
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let text = self.send(request).await?.text().await?;
        serde_json::from_str(&text).map_err(ClientError::Decode)
    }

    // Workers

    pub async fn list_workers(
        &self,
        filter: WorkerFilter,
    ) -> Result<Vec<MedicalWorker>, ClientError> {
        let request = self.client.get(self.url(endpoints::WORKERS)).query(&filter.query());
        self.json(request).await
    }

    pub async fn get_worker(&self, id: i64) -> Result<MedicalWorker, ClientError> {
        self.json(self.client.get(self.url(&endpoints::worker(id)))).await
    }

    pub async fn create_worker(
        &self,
        worker: &NewMedicalWorker,
    ) -> Result<WorkerCreated, ClientError> {
        worker.validate()?;
        let created: WorkerCreated = self
            .json(self.client.post(self.url(endpoints::WORKERS)).json(worker))
            .await?;
        info!("Created worker {}", created.worker_id);
        Ok(created)
    }

    /// Update a worker
    ///
    /// A stale `row_version` comes back as
    /// [`ApiError::ConcurrencyConflict`]; reload with [`get_worker`] and
    /// retry.
    ///
    /// [`get_worker`]: DirectoryClient::get_worker
    pub async fn update_worker(
        &self,
        id: i64,
        update: &WorkerUpdate,
    ) -> Result<ApiMessage, ClientError> {
        update.validate()?;
        let result = self
            .json(self.client.put(self.url(&endpoints::worker(id))).json(update))
            .await;
        if let Err(err) = &result {
            if err.is_recoverable_conflict() {
                warn!("Worker {} changed on the server since it was loaded", id);
            }
        }
        result
    }

    pub async fn delete_worker(&self, id: i64) -> Result<ApiMessage, ClientError> {
        self.json(self.client.delete(self.url(&endpoints::worker(id)))).await
    }

    // Photos

    pub async fn get_image(&self, id: i64) -> Result<Option<Vec<u8>>, ClientError> {
        let response = self
            .send(self.client.get(self.url(&endpoints::worker_image(id))))
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            debug!("Worker {} has no image", id);
            return Ok(None);
        }
        let bytes = response.bytes().await?;
        Ok((!bytes.is_empty()).then(|| bytes.to_vec()))
    }

    /// Upload an edited photo as `worker_{id}_edited.png`
    pub async fn upload_image(&self, id: i64, png: Vec<u8>) -> Result<ApiMessage, ClientError> {
        let size = png.len();
        let part = Part::bytes(png)
            .file_name(edited_image_filename(id))
            .mime_str("image/png")?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let message = self
            .json(self.client.post(self.url(&endpoints::worker_image(id))).multipart(form))
            .await?;
        info!("Uploaded {} byte image for worker {}", size, id);
        Ok(message)
    }

    pub async fn delete_image(&self, id: i64) -> Result<ApiMessage, ClientError> {
        self.json(self.client.delete(self.url(&endpoints::worker_image(id)))).await
    }

    // Departments and lookups

    pub async fn departments_for_facility(
        &self,
        facility_type_id: i64,
    ) -> Result<Vec<Department>, ClientError> {
        let request = self
            .client
            .get(self.url(endpoints::DEPARTMENTS))
            .query(&endpoints::departments_query(facility_type_id));
        self.json(request).await
    }

    pub async fn all_departments(&self) -> Result<Vec<Department>, ClientError> {
        self.json(self.client.get(self.url(endpoints::ALL_DEPARTMENTS))).await
    }

    pub async fn department_details(&self, id: i64) -> Result<Department, ClientError> {
        self.json(self.client.get(self.url(&endpoints::department_details(id))))
            .await
    }

    /// Delete a department
    ///
    /// Blocked deletes come back as [`ApiError::Conflict`] carrying the
    /// server's explanation.
    pub async fn delete_department(&self, id: i64) -> Result<DepartmentDeleted, ClientError> {
        let deleted: DepartmentDeleted = self
            .json(self.client.delete(self.url(&endpoints::department(id))))
            .await?;
        info!("{} ({} workers removed)", deleted.message, deleted.workers_deleted);
        Ok(deleted)
    }

    pub async fn specializations(&self) -> Result<Vec<Specialization>, ClientError> {
        self.json(self.client.get(self.url(endpoints::SPECIALIZATIONS))).await
    }

    pub async fn facility_types(&self) -> Result<Vec<FacilityType>, ClientError> {
        self.json(self.client.get(self.url(endpoints::FACILITY_TYPES))).await
    }

    // Reports

    pub async fn download_report(&self) -> Result<Report, ClientError> {
        let response = self
            .send(self.client.get(self.url(endpoints::DOWNLOAD_REPORT)))
            .await?;
        let filename = report_filename(
            response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok()),
        );
        let bytes = response.bytes().await?.to_vec();
        info!("Downloaded report {} ({} bytes)", filename, bytes.len());
        Ok(Report { filename, bytes })
    }
}

impl ImageStore for DirectoryClient {
    async fn fetch_image(&self, worker_id: i64) -> Result<Option<Vec<u8>>, ClientError> {
        self.get_image(worker_id).await
    }

    async fn store_image(&self, worker_id: i64, png: Vec<u8>) -> Result<(), ClientError> {
        self.upload_image(worker_id, png).await.map(|_| ())
    }
}

impl WorkerStore for DirectoryClient {
    async fn load_worker(&self, worker_id: i64) -> Result<MedicalWorker, ClientError> {
        self.get_worker(worker_id).await
    }

    async fn save_worker(
        &self,
        worker_id: i64,
        update: &WorkerUpdate,
    ) -> Result<ApiMessage, ClientError> {
        self.update_worker(worker_id, update).await
    }
}
