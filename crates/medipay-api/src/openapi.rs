// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

#[must_use]
pub fn openapi_v1_spec() -> Value {
    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "MediPay API",
        "description": "Medical debt risk assessment and repayment planning",
        "version": "v1"
      },
      "paths": {
        "/healthz": {"get": {"responses": {"200": {"description": "ok"}}}},
        "/v1/debts": {
          "post": {
            "responses": {
              "201": {"description": "debt created with computed risk fields"},
              "400": {"description": "invalid financial input", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          },
          "get": {
            "parameters": [
              {"name": "risk_level", "in": "query", "schema": {"type": "string", "enum": ["Low", "Medium", "High"]}},
              {"name": "provider", "in": "query", "schema": {"type": "string", "description": "case-insensitive substring match"}},
              {"name": "patient_name", "in": "query", "schema": {"type": "string", "description": "case-insensitive substring match"}},
              {"name": "limit", "in": "query", "schema": {"type": "integer", "minimum": 1, "maximum": 100}},
              {"name": "offset", "in": "query", "schema": {"type": "integer", "minimum": 0}}
            ],
            "responses": {
              "200": {"description": "paged debt list with total count"},
              "400": {"description": "invalid query", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/debts/{id}": {
          "get": {
            "responses": {
              "200": {"description": "full debt record"},
              "404": {"description": "debt not found", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          },
          "patch": {
            "responses": {
              "200": {"description": "updated record; risk fields recomputed when financial fields change"},
              "400": {"description": "invalid financial input after merge", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "debt not found", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          },
          "delete": {
            "responses": {
              "204": {"description": "deleted (idempotent; absent ids also return 204)"}
            }
          }
        },
        "/v1/debts/{id}/summary": {
          "get": {
            "responses": {
              "200": {"description": "payoff projection"},
              "404": {"description": "debt not found", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        },
        "/v1/checkout/sessions": {
          "post": {
            "responses": {
              "200": {"description": "hosted checkout session url"},
              "400": {"description": "amount below gateway minimum or gateway rejection", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "404": {"description": "debt not found", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}},
              "503": {"description": "gateway unconfigured", "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ApiError"}}}}
            }
          }
        }
      },
      "components": {
        "schemas": {
          "ApiErrorCode": {
            "type": "string",
            "enum": [
              "InvalidQueryParameter",
              "ValidationFailed",
              "DebtNotFound",
              "GatewayUnconfigured",
              "GatewayRejected",
              "Internal"
            ]
          },
          "ApiError": {
            "type": "object",
            "required": ["code", "message", "details"],
            "additionalProperties": false,
            "properties": {
              "code": {"$ref": "#/components/schemas/ApiErrorCode"},
              "message": {"type": "string"},
              "details": {"type": "object"}
            }
          }
        }
      }
    })
}
