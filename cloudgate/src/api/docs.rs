use axum::response::Html;
use utoipa::OpenApi;

use crate::api::envelope::Envelope;
use crate::service::item::PutItemRequest;

pub const DOCS_PATH: &str = "/apidocs";
pub const SPEC_PATH: &str = "/apispec.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AWS API Dashboard",
        description = "Interactive dashboard for S3 buckets and DynamoDB items.\n\n\
            Every response is a JSON envelope: `success` tells whether the call went through, \
            `data` and `message` carry the result, `error` carries the reason of a failure.\n\n\
            - [AWS Management Console](https://console.aws.amazon.com/)\n\
            - [S3 documentation](https://docs.aws.amazon.com/s3/)\n\
            - [DynamoDB documentation](https://docs.aws.amazon.com/amazondynamodb/)"
    ),
    paths(
        crate::service::bucket::list_buckets,
        crate::service::bucket::create_bucket,
        crate::service::bucket::delete_bucket,
        crate::service::item::scan_items,
        crate::service::item::put_item,
        crate::service::item::delete_item,
    ),
    components(schemas(Envelope, PutItemRequest)),
    tags(
        (name = "S3", description = "S3 bucket endpoints"),
        (name = "DynamoDB", description = "DynamoDB item endpoints"),
    )
)]
pub struct ApiDoc;

const SWAGGER_UI: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>AWS API Dashboard</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/apispec.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

pub async fn serve_docs() -> Html<&'static str> {
    Html(SWAGGER_UI)
}
