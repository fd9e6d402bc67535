use google_sheets4::FieldMask;
use google_sheets4::api::{
    CellData, CellFormat, GridProperties, GridRange, RepeatCellRequest, Request, SheetProperties,
    TextFormat, UpdateSheetPropertiesRequest,
};

/// Requests that style a freshly written header: bold text, frozen in place.
pub(super) fn header_format_requests(sheet_id: i32) -> Vec<Request> {
    let header_row = GridRange {
        sheet_id: Some(sheet_id),
        start_row_index: Some(0),
        end_row_index: Some(1),
        ..Default::default()
    };

    let bold = Request {
        repeat_cell: Some(RepeatCellRequest {
            range: Some(header_row),
            cell: Some(CellData {
                user_entered_format: Some(CellFormat {
                    text_format: Some(TextFormat {
                        bold: Some(true),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            fields: Some(FieldMask::new(&["userEnteredFormat.textFormat.bold"])),
        }),
        ..Default::default()
    };

    let freeze = Request {
        update_sheet_properties: Some(UpdateSheetPropertiesRequest {
            properties: Some(SheetProperties {
                sheet_id: Some(sheet_id),
                grid_properties: Some(GridProperties {
                    frozen_row_count: Some(1),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            fields: Some(FieldMask::new(&["gridProperties.frozenRowCount"])),
        }),
        ..Default::default()
    };

    vec![bold, freeze]
}
